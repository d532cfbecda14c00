//! One-shot caseload regression job.
//!
//! Fetches the surgical caseload snapshot, fits the monthly-caseload OLS
//! model, and prints the fit summary and held-out MSE. A failed fetch
//! prints a diagnostic and exits 0; set `RUST_LOG=caseload=debug` for
//! step-level detail.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use caseload::pipeline::{self, PipelineConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let config = PipelineConfig::default();
    // `None` means the fetch failed; the diagnostic is already printed and
    // the job still exits 0.
    pipeline::run(&config)?;
    Ok(())
}
