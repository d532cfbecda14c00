//! Driver: sequences fetch, split, encode, outlier scan, fit, evaluate.

use ndarray::ArrayView1;

use crate::encode::{Aggregate, EncodeError, TargetEncoding};
use crate::eval::{mean_squared_error, EvalError};
use crate::fetch;
use crate::frame::{Frame, FrameError};
use crate::outliers::detect_outliers;
use crate::regress::{FitError, Formula, FormulaError, OlsModel};
use crate::split::{train_test_split, SplitError};

/// Job configuration. The defaults reproduce the production run: fixed
/// endpoint, 20% test split at seed 0, mean encoding of `service_id`, and
/// the four numeric columns scanned for outliers.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub url: String,
    pub test_fraction: f64,
    pub seed: u64,
    /// Categorical column to target-encode.
    pub group_column: String,
    /// Regression target, also the encoding target.
    pub target: String,
    pub formula: String,
    /// Numeric columns scanned by the outlier gate (post-encoding names).
    pub outlier_columns: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url: fetch::DATA_URL.to_owned(),
            test_fraction: 0.2,
            seed: 0,
            group_column: "service_id".to_owned(),
            target: "surgeries_this_month".to_owned(),
            formula: "surgeries_this_month ~ age_in_yrs + service_id + surgeries_last_month"
                .to_owned(),
            outlier_columns: vec![
                "age_in_yrs".to_owned(),
                "service_id".to_owned(),
                "surgeries_last_month".to_owned(),
                "surgeries_this_month".to_owned(),
            ],
        }
    }
}

/// Any failure past the fetch stage. Fetch failure is not an error: the
/// fetcher's boolean contract turns it into the `Ok(None)` early exit.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Formula(#[from] FormulaError),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// What a completed run produced, for callers that want more than stdout.
#[derive(Debug)]
pub struct PipelineReport {
    pub n_train: usize,
    pub n_test: usize,
    /// How many scanned columns had at least one outlier.
    pub outlier_columns_flagged: usize,
    pub summary: String,
    pub mse: f64,
}

/// Run the whole job: fetch, then model.
///
/// Returns `Ok(None)` when the fetch failed; the diagnostic has already
/// been printed and the process is expected to exit normally.
pub fn run(config: &PipelineConfig) -> Result<Option<PipelineReport>, PipelineError> {
    let (frame, fetched) = fetch::fetch_table(&config.url);
    if !fetched {
        return Ok(None);
    }
    run_on_frame(config, &frame).map(Some)
}

/// Model an already-fetched frame. Split out of [`run`] so tests and
/// embedders can drive the pipeline without the network.
pub fn run_on_frame(
    config: &PipelineConfig,
    frame: &Frame,
) -> Result<PipelineReport, PipelineError> {
    let (train, test) = train_test_split(frame, config.test_fraction, config.seed)?;
    tracing::debug!(n_train = train.n_rows(), n_test = test.n_rows(), "split data");

    let (train, encoding) =
        TargetEncoding::fit(&train, &config.group_column, &config.target, Aggregate::Mean)?;
    let test = encoding.apply(&test)?;

    // Validation gate only: flagged columns are counted, the filtered
    // frames are discarded, and training proceeds on the full train set.
    // This mirrors the production job, where the check always came back
    // clean. Feed `_filtered` forward instead to actually drop rows.
    let mut flagged = 0;
    for column in &config.outlier_columns {
        let (found, _filtered) = detect_outliers(&train, column)?;
        if found {
            tracing::debug!(%column, "outliers present");
            flagged += 1;
        }
    }
    if flagged == 0 {
        println!("No outliers found. Proceeding without any data elimination from train set.\n");
    }

    let formula: Formula = config.formula.parse()?;
    let model = OlsModel::fit(&formula, &train)?;
    let summary = model.summary().to_string();
    println!("{summary}");

    let predicted = model.predict(&test)?;
    let actual = test.numeric(&config.target)?;
    let mse = mean_squared_error(predicted.view(), ArrayView1::from(actual))?;
    println!("MSE on test set is: {mse}");

    Ok(PipelineReport {
        n_train: train.n_rows(),
        n_test: test.n_rows(),
        outlier_columns_flagged: flagged,
        summary,
        mse,
    })
}
