//! Error type for frame construction and access.

/// Errors raised by [`Frame`](super::Frame) construction and column access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("column `{name}` not found")]
    ColumnNotFound { name: String },

    #[error("column `{name}` has {actual} rows but the frame has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("column `{name}` already exists")]
    DuplicateColumn { name: String },

    #[error("column `{name}` is not {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },
}
