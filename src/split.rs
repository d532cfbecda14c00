//! Seeded train/test partition.

use rand::prelude::*;

use crate::frame::Frame;

/// Errors raised by [`train_test_split`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {fraction}")]
    InvalidFraction { fraction: f64 },

    #[error("cannot split an empty frame")]
    EmptyFrame,
}

/// Shuffle rows with a seeded RNG and partition them into train and test.
///
/// The test size is `round(n_rows * test_fraction)`. The partition is
/// disjoint and covers every row exactly once, and the same seed on the
/// same frame always reproduces the same partition.
///
/// Returns `(train, test)`.
pub fn train_test_split(
    frame: &Frame,
    test_fraction: f64,
    seed: u64,
) -> Result<(Frame, Frame), SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction {
            fraction: test_fraction,
        });
    }
    let n_rows = frame.n_rows();
    if n_rows == 0 {
        return Err(SplitError::EmptyFrame);
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_len = ((n_rows as f64) * test_fraction).round() as usize;
    let test_len = test_len.min(n_rows);
    let (test_idx, train_idx) = indices.split_at(test_len);

    Ok((frame.take_rows(train_idx), frame.take_rows(test_idx)))
}
