//! Ordinary least squares fitting.
//!
//! Solves the normal equations `XᵀX β = Xᵀy` with a Cholesky
//! factorization. The design matrix carries an implicit intercept as its
//! first column. Alongside the coefficients, the fit computes the standard
//! errors, t statistics, two-sided p-values, and (adjusted) R² that the
//! summary reports.

use ndarray::{Array1, Array2, ArrayView1};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::frame::Frame;

use super::formula::Formula;
use super::summary::OlsSummary;

/// Errors raised while fitting or predicting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("column `{name}` named in the formula is missing or not numeric")]
    MissingColumn { name: String },

    #[error("column `{name}` contains non-finite values")]
    NonFinite { name: String },

    #[error("cannot fit {n_params} parameters with only {n_rows} rows")]
    Underdetermined { n_rows: usize, n_params: usize },

    #[error("design matrix is singular (a predictor is constant or collinear)")]
    Singular,
}

/// A fitted OLS model. Immutable once fitted.
#[derive(Debug, Clone)]
pub struct OlsModel {
    formula: Formula,
    coefficients: Array1<f64>,
    std_errors: Array1<f64>,
    t_values: Array1<f64>,
    p_values: Array1<f64>,
    r_squared: f64,
    adj_r_squared: f64,
    n_obs: usize,
    df_resid: usize,
}

impl OlsModel {
    /// Fit the formula against a frame.
    ///
    /// Requires strictly more rows than parameters (a residual degree of
    /// freedom is needed for the standard errors). Columns with NaN values
    /// are rejected rather than fit through; an unseen encoded category
    /// that leaked into the training frame surfaces here as
    /// [`FitError::NonFinite`].
    pub fn fit(formula: &Formula, frame: &Frame) -> Result<OlsModel, FitError> {
        let y = Array1::from(column(frame, formula.response())?.to_vec());
        let x = design_matrix(formula, frame)?;
        let (n_rows, n_params) = x.dim();
        if n_rows <= n_params {
            return Err(FitError::Underdetermined { n_rows, n_params });
        }

        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let chol = cholesky(&xtx).ok_or(FitError::Singular)?;
        let coefficients = solve(&chol, xty.view());

        // Residual variance and the coefficient covariance diagonal.
        let residuals = &y - &x.dot(&coefficients);
        let rss = residuals.dot(&residuals);
        let df_resid = n_rows - n_params;
        let sigma2 = rss / df_resid as f64;
        let xtx_inv = invert(&chol);

        let std_errors = Array1::from_iter((0..n_params).map(|i| (sigma2 * xtx_inv[[i, i]]).sqrt()));
        let t_values = &coefficients / &std_errors;
        let p_values = match StudentsT::new(0.0, 1.0, df_resid as f64) {
            Ok(dist) => t_values.mapv(|t| 2.0 * (1.0 - dist.cdf(t.abs()))),
            Err(_) => Array1::from_elem(n_params, f64::NAN),
        };

        let y_mean = y.sum() / n_rows as f64;
        let tss = y.iter().map(|v| (v - y_mean).powi(2)).sum::<f64>();
        let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { f64::NAN };
        let adj_r_squared =
            1.0 - (1.0 - r_squared) * (n_rows as f64 - 1.0) / df_resid as f64;

        Ok(OlsModel {
            formula: formula.clone(),
            coefficients,
            std_errors,
            t_values,
            p_values,
            r_squared,
            adj_r_squared,
            n_obs: n_rows,
            df_resid,
        })
    }

    /// Predict the response for every row of `frame`.
    pub fn predict(&self, frame: &Frame) -> Result<Array1<f64>, FitError> {
        let x = design_matrix(&self.formula, frame)?;
        Ok(x.dot(&self.coefficients))
    }

    /// Human-readable fit summary (implements `Display`).
    pub fn summary(&self) -> OlsSummary<'_> {
        OlsSummary::new(self)
    }

    /// Parameter names: `Intercept` followed by the formula's terms.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once("Intercept").chain(self.formula.terms().iter().map(String::as_str))
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Fitted coefficients, intercept first.
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    pub fn std_errors(&self) -> ArrayView1<'_, f64> {
        self.std_errors.view()
    }

    pub fn t_values(&self) -> ArrayView1<'_, f64> {
        self.t_values.view()
    }

    pub fn p_values(&self) -> ArrayView1<'_, f64> {
        self.p_values.view()
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    pub fn adj_r_squared(&self) -> f64 {
        self.adj_r_squared
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    pub fn df_resid(&self) -> usize {
        self.df_resid
    }
}

fn column<'a>(frame: &'a Frame, name: &str) -> Result<&'a [f64], FitError> {
    let values = frame.numeric(name).map_err(|_| FitError::MissingColumn {
        name: name.to_owned(),
    })?;
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite {
            name: name.to_owned(),
        });
    }
    Ok(values)
}

/// Build `[n_rows, 1 + n_terms]` with the intercept column first.
fn design_matrix(formula: &Formula, frame: &Frame) -> Result<Array2<f64>, FitError> {
    let n_rows = frame.n_rows();
    let n_params = formula.terms().len() + 1;
    let mut x = Array2::ones((n_rows, n_params));
    for (j, term) in formula.terms().iter().enumerate() {
        let values = column(frame, term)?;
        for (i, &v) in values.iter().enumerate() {
            x[[i, j + 1]] = v;
        }
    }
    Ok(x)
}

/// Lower-triangular Cholesky factor of a symmetric positive-definite
/// matrix, or `None` when a pivot collapses (singular design).
fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[[i, j]];
            for k in 0..j {
                sum -= l[[i, k]] * l[[j, k]];
            }
            if i == j {
                // Pivot tolerance relative to the diagonal's scale.
                if sum <= 1e-10 * a[[i, i]].abs().max(1.0) {
                    return None;
                }
                l[[i, j]] = sum.sqrt();
            } else {
                l[[i, j]] = sum / l[[j, j]];
            }
        }
    }
    Some(l)
}

/// Solve `L Lᵀ x = b` by forward then backward substitution.
fn solve(l: &Array2<f64>, b: ArrayView1<f64>) -> Array1<f64> {
    let n = l.nrows();
    let mut z = Array1::zeros(n);
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[[i, k]] * z[k];
        }
        z[i] = sum / l[[i, i]];
    }
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[[k, i]] * x[k];
        }
        x[i] = sum / l[[i, i]];
    }
    x
}

/// Invert `L Lᵀ` by solving against each unit vector.
fn invert(l: &Array2<f64>) -> Array2<f64> {
    let n = l.nrows();
    let mut inv = Array2::zeros((n, n));
    for j in 0..n {
        let mut e = Array1::zeros(n);
        e[j] = 1.0;
        let col = solve(l, e.view());
        inv.column_mut(j).assign(&col);
    }
    inv
}
