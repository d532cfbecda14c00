//! Linear regression: formula parsing, OLS fitting, and the fit summary.
//!
//! # Key Types
//!
//! - [`Formula`]: parsed `response ~ term + term` model description
//! - [`OlsModel`]: immutable fitted model with `predict` and `summary`
//! - [`FitError`]: structured fitting failures (missing column, singular
//!   design, too few rows, non-finite data)

mod formula;
mod ols;
mod summary;

pub use formula::{Formula, FormulaError};
pub use ols::{FitError, OlsModel};
pub use summary::OlsSummary;
