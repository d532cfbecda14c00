//! The record table container.

use super::column::Column;
use super::error::FrameError;

/// An ordered, column-major record table.
///
/// Columns are named and share one row count. Every transformation in this
/// crate returns a **new** `Frame`; nothing mutates a caller's table in
/// place. An empty frame (no columns) has zero rows.
///
/// # Example
///
/// ```
/// use caseload::frame::{Column, Frame};
///
/// let mut frame = Frame::new();
/// frame.push_column("age_in_yrs", Column::Numeric(vec![54.0, 61.0])).unwrap();
/// frame.push_column("service_id", Column::Categorical(vec!["S1".into(), "S2".into()])).unwrap();
///
/// assert_eq!(frame.n_rows(), 2);
/// assert_eq!(frame.numeric("age_in_yrs").unwrap(), &[54.0, 61.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Column)>,
}

impl Frame {
    /// Create an empty frame (no columns, no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows. Zero for a frame with no columns.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, col)| col.len())
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names, in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col)
    }

    /// Append a column. The name must be new and the length must match the
    /// frame's row count (any length is accepted for the first column).
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<(), FrameError> {
        let name = name.into();
        if self.column(&name).is_some() {
            return Err(FrameError::DuplicateColumn { name });
        }
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                name,
                expected: self.n_rows(),
                actual: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// Borrow a numeric column's values.
    pub fn numeric(&self, name: &str) -> Result<&[f64], FrameError> {
        match self.column(name) {
            Some(Column::Numeric(v)) => Ok(v),
            Some(Column::Categorical(_)) => Err(FrameError::TypeMismatch {
                name: name.to_owned(),
                expected: "numeric",
            }),
            None => Err(FrameError::ColumnNotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// Borrow a categorical column's labels.
    pub fn categorical(&self, name: &str) -> Result<&[String], FrameError> {
        match self.column(name) {
            Some(Column::Categorical(v)) => Ok(v),
            Some(Column::Numeric(_)) => Err(FrameError::TypeMismatch {
                name: name.to_owned(),
                expected: "categorical",
            }),
            None => Err(FrameError::ColumnNotFound {
                name: name.to_owned(),
            }),
        }
    }

    /// New frame holding the rows at `indices`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self
                .columns
                .iter()
                .map(|(name, col)| (name.clone(), col.take(indices)))
                .collect(),
        }
    }

    /// New frame with `name` replaced by a numeric column of `values`.
    ///
    /// The column must already exist (any type); the length must match.
    pub fn with_numeric_column(&self, name: &str, values: Vec<f64>) -> Result<Frame, FrameError> {
        if self.column(name).is_none() {
            return Err(FrameError::ColumnNotFound {
                name: name.to_owned(),
            });
        }
        if values.len() != self.n_rows() {
            return Err(FrameError::LengthMismatch {
                name: name.to_owned(),
                expected: self.n_rows(),
                actual: values.len(),
            });
        }
        let mut out = self.clone();
        for (n, col) in &mut out.columns {
            if n == name {
                *col = Column::Numeric(values);
                break;
            }
        }
        Ok(out)
    }
}
