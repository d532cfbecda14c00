//! Target encoding for categorical columns.
//!
//! Replaces a categorical column with a per-category aggregate of a numeric
//! target column. The aggregate is computed on the frame the encoding is
//! **fitted** on (the training set); applying it to any other frame is a
//! pure lookup, so held-out data never leaks into the mapping.

use std::collections::HashMap;

use crate::frame::{Frame, FrameError};

/// Aggregation used to collapse a category's target values into one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregate {
    #[default]
    Mean,
    Median,
    Min,
    Max,
}

impl Aggregate {
    fn compute(self, values: &mut [f64]) -> f64 {
        match self {
            Aggregate::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregate::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
            Aggregate::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

/// Errors raised while fitting or applying a [`TargetEncoding`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("cannot fit an encoding on an empty frame")]
    EmptyFrame,
}

/// A fitted category → aggregate mapping for one categorical column.
///
/// Categories unseen at fit time encode to `f64::NAN`, the crate's missing
/// value sentinel. Downstream consumers decide what a NaN means for them;
/// [`OlsModel`](crate::regress::OlsModel) rejects it with a structured
/// error instead of fitting through it.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEncoding {
    column: String,
    mapping: HashMap<String, f64>,
}

impl TargetEncoding {
    /// Fit an encoding of `column` against `target` and apply it.
    ///
    /// Returns the transformed frame (with `column` now numeric) and the
    /// fitted mapping, ready to be re-applied to a disjoint frame.
    pub fn fit(
        frame: &Frame,
        column: &str,
        target: &str,
        aggregate: Aggregate,
    ) -> Result<(Frame, TargetEncoding), EncodeError> {
        let labels = frame.categorical(column)?;
        let targets = frame.numeric(target)?;
        if labels.is_empty() {
            return Err(EncodeError::EmptyFrame);
        }

        let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
        for (label, &value) in labels.iter().zip(targets) {
            groups.entry(label).or_default().push(value);
        }
        let mapping = groups
            .into_iter()
            .map(|(label, mut values)| (label.to_owned(), aggregate.compute(&mut values)))
            .collect();

        let encoding = TargetEncoding {
            column: column.to_owned(),
            mapping,
        };
        let transformed = encoding.apply(frame)?;
        Ok((transformed, encoding))
    }

    /// Apply the fitted mapping to a frame by lookup.
    ///
    /// Never recomputes aggregates from `frame`'s own data. Labels without
    /// a mapping entry become `f64::NAN`.
    pub fn apply(&self, frame: &Frame) -> Result<Frame, EncodeError> {
        let labels = frame.categorical(&self.column)?;
        let encoded = labels
            .iter()
            .map(|label| self.mapping.get(label).copied().unwrap_or(f64::NAN))
            .collect();
        Ok(frame.with_numeric_column(&self.column, encoded)?)
    }

    /// The encoded column's name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The fitted category → aggregate mapping.
    pub fn mapping(&self) -> &HashMap<String, f64> {
        &self.mapping
    }
}
