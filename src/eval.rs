//! Prediction quality metrics.

use ndarray::ArrayView1;

/// Errors raised by metric computation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("predicted has {predicted} values but actual has {actual}")]
    DimensionMismatch { predicted: usize, actual: usize },
}

/// Mean squared error: `mean((predicted - actual)²)`.
///
/// Lower is better. Inputs must have the same length and row order;
/// a mismatch is a reported error, not a panic.
pub fn mean_squared_error(
    predicted: ArrayView1<f64>,
    actual: ArrayView1<f64>,
) -> Result<f64, EvalError> {
    if predicted.len() != actual.len() {
        return Err(EvalError::DimensionMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Ok(0.0);
    }

    let sum_sq = predicted
        .iter()
        .zip(actual.iter())
        .fold(0.0f64, |acc, (&p, &a)| {
            let diff = p - a;
            acc + diff * diff
        });
    Ok(sum_sq / predicted.len() as f64)
}
