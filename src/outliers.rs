//! IQR outlier detection (the box-plot rule).
//!
//! A value is an outlier when it falls strictly outside
//! `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`. Quantiles use linear interpolation.
//! NaN values are ignored when computing quantiles and are never flagged
//! as outliers themselves.

use crate::frame::{Frame, FrameError};

/// Per-column outlier bounds derived from the quartiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    /// True when `value` is strictly outside the bounds. Boundary values
    /// and NaN are not outliers.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Linearly interpolated quantile of an already-sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));
    let position = q * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let weight = position - lo as f64;
        sorted[lo] * (1.0 - weight) + sorted[hi] * weight
    }
}

/// Box-plot bounds for `values`, ignoring non-finite entries.
///
/// Returns `None` when no finite values remain.
pub fn iqr_bounds(values: &[f64]) -> Option<Bounds> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);
    let q1 = quantile(&finite, 0.25);
    let q3 = quantile(&finite, 0.75);
    let iqr = q3 - q1;
    Some(Bounds {
        lower: q1 - 1.5 * iqr,
        upper: q3 + 1.5 * iqr,
    })
}

/// Scan one numeric column for outliers.
///
/// Returns `(found, filtered)` where `filtered` is a **new** frame with the
/// outlier rows removed. When nothing is flagged the returned frame is
/// row-for-row identical to the input; the caller's frame is never touched.
pub fn detect_outliers(frame: &Frame, column: &str) -> Result<(bool, Frame), FrameError> {
    let values = frame.numeric(column)?;
    let Some(bounds) = iqr_bounds(values) else {
        return Ok((false, frame.clone()));
    };

    let keep: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| !bounds.is_outlier(v))
        .map(|(i, _)| i)
        .collect();

    if keep.len() == values.len() {
        return Ok((false, frame.clone()));
    }
    Ok((true, frame.take_rows(&keep)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Column;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn frame_of(values: Vec<f64>) -> Frame {
        let mut f = Frame::new();
        f.push_column("v", Column::Numeric(values)).unwrap();
        f
    }

    #[test]
    fn bounds_match_hand_computation() {
        // sorted: 1..=9, Q1 = 3, Q3 = 7, IQR = 4
        let values: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        let bounds = iqr_bounds(&values).unwrap();
        assert_relative_eq!(bounds.lower, -3.0);
        assert_relative_eq!(bounds.upper, 13.0);
    }

    #[rstest]
    #[case(0.5, 5.0)]
    #[case(0.25, 3.0)]
    #[case(0.0, 1.0)]
    #[case(1.0, 9.0)]
    fn quantiles_interpolate(#[case] q: f64, #[case] expected: f64) {
        let values: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        assert_relative_eq!(quantile(&values, q), expected);
    }

    #[test]
    fn clean_column_reports_no_outliers_and_identical_frame() {
        let f = frame_of((1..=9).map(|i| i as f64).collect());
        let (found, filtered) = detect_outliers(&f, "v").unwrap();
        assert!(!found);
        assert_eq!(filtered, f);
    }

    #[test]
    fn extreme_value_is_removed_boundaries_kept() {
        let mut values: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        values.push(100.0);
        let f = frame_of(values);
        let (found, filtered) = detect_outliers(&f, "v").unwrap();
        assert!(found);
        assert_eq!(filtered.n_rows(), 9);
        let bounds = iqr_bounds(f.numeric("v").unwrap()).unwrap();
        for &v in filtered.numeric("v").unwrap() {
            assert!(v >= bounds.lower && v <= bounds.upper);
        }
    }

    #[test]
    fn nan_rows_are_kept_not_flagged() {
        let f = frame_of(vec![1.0, 2.0, f64::NAN, 3.0, 4.0]);
        let (found, filtered) = detect_outliers(&f, "v").unwrap();
        assert!(!found);
        assert_eq!(filtered.n_rows(), 5);
    }

    #[test]
    fn all_nan_column_has_no_bounds() {
        assert_eq!(iqr_bounds(&[f64::NAN, f64::NAN]), None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let f = frame_of(vec![1.0]);
        assert!(matches!(
            detect_outliers(&f, "nope"),
            Err(FrameError::ColumnNotFound { .. })
        ));
    }
}
