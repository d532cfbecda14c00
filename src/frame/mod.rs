//! Record table container.
//!
//! This module provides [`Frame`], the tabular input type for the whole
//! pipeline, and [`Column`], its per-column storage.
//!
//! # Storage Layout
//!
//! Frames are **column-major**: each named column owns a contiguous vector
//! of its values. Numeric columns are `f64` with `f64::NAN` as the missing
//! value; categorical columns keep their string labels until an encoding
//! turns them numeric.
//!
//! # New-frame contract
//!
//! Every transformation (`take_rows`, `with_numeric_column`, and everything
//! built on them) returns a fresh `Frame` and never mutates its input.

#[allow(clippy::module_inception)]
mod frame;

mod column;
mod error;

pub use column::Column;
pub use error::FrameError;
pub use frame::Frame;
