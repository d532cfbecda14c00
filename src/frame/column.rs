//! Column storage for [`Frame`](super::Frame).

/// A single named column's values.
///
/// Numeric columns use `f64::NAN` for missing values. Categorical columns
/// hold their raw string labels; encoding them to numbers is the job of
/// [`TargetEncoding`](crate::encode::TargetEncoding).
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Continuous numeric values. Missing values: `f64::NAN`.
    Numeric(Vec<f64>),
    /// Categorical string labels.
    Categorical(Vec<String>),
}

impl Column {
    /// Number of rows in this column.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if this is a numeric column.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }

    /// Returns true if this is a categorical column.
    pub fn is_categorical(&self) -> bool {
        matches!(self, Column::Categorical(_))
    }

    /// New column holding the rows at `indices`, in that order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub(super) fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(indices.iter().map(|&i| v[i]).collect()),
            Column::Categorical(v) => {
                Column::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}
