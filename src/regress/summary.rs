//! Text rendering of a fitted model.

use std::fmt;

use super::ols::OlsModel;

/// Display adapter producing the fit report the driver prints.
///
/// The layout follows the familiar statsmodels table: header block with
/// R², then one row per parameter with coefficient, standard error,
/// t statistic, and two-sided p-value.
pub struct OlsSummary<'a> {
    model: &'a OlsModel,
}

impl<'a> OlsSummary<'a> {
    pub(super) fn new(model: &'a OlsModel) -> Self {
        Self { model }
    }
}

impl fmt::Display for OlsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.model;
        writeln!(f, "                 OLS Regression Results")?;
        writeln!(f, "========================================================")?;
        writeln!(f, "Formula:        {}", m.formula())?;
        writeln!(f, "Observations:   {:<8} Df residuals: {}", m.n_obs(), m.df_resid())?;
        writeln!(
            f,
            "R-squared:      {:<8.4} Adj. R-squared: {:.4}",
            m.r_squared(),
            m.adj_r_squared()
        )?;
        writeln!(f, "--------------------------------------------------------")?;
        writeln!(
            f,
            "{:<22} {:>10} {:>9} {:>8} {:>7}",
            "", "coef", "std err", "t", "P>|t|"
        )?;
        for (i, name) in m.param_names().enumerate() {
            writeln!(
                f,
                "{:<22} {:>10.4} {:>9.4} {:>8.3} {:>7.3}",
                name,
                m.coefficients()[i],
                m.std_errors()[i],
                m.t_values()[i],
                m.p_values()[i]
            )?;
        }
        writeln!(f, "========================================================")
    }
}
