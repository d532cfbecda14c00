//! caseload: a one-shot regression job for monthly surgical caseload.
//!
//! Fetches a tabular snapshot from a remote API, target-encodes the
//! service identifier, gates on an IQR outlier scan, fits an OLS model of
//! this month's surgeries, and reports the held-out mean squared error.
//!
//! # Key Types
//!
//! - [`Frame`] / [`Column`] - The record table and its column storage
//! - [`TargetEncoding`] - Fitted category → mean mapping, reusable on
//!   held-out data
//! - [`OlsModel`] / [`Formula`] - Fitted linear model and its formula
//! - [`PipelineConfig`] - Driver configuration (endpoint, split, formula)
//!
//! # Running
//!
//! Use [`pipeline::run`] with [`PipelineConfig::default`] for the
//! production job, or [`pipeline::run_on_frame`] to model a frame you
//! already have.

pub mod encode;
pub mod eval;
pub mod fetch;
pub mod frame;
pub mod outliers;
pub mod pipeline;
pub mod regress;
pub mod split;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use encode::{Aggregate, TargetEncoding};
pub use eval::mean_squared_error;
pub use frame::{Column, Frame, FrameError};
pub use outliers::{detect_outliers, iqr_bounds, Bounds};
pub use pipeline::{PipelineConfig, PipelineError, PipelineReport};
pub use regress::{FitError, Formula, OlsModel};
pub use split::train_test_split;
