//! Shared pipeline logic behind the CLI commands.
//!
//! Keeping this in one place separates the workflow:
//! load -> fit -> diagnostics -> (optional) predict
//!
//! from presentation (printing and exports) in `app`.

use nalgebra::{DMatrix, DVector};

use crate::data::{generate_linear_sample, SampleData};
use crate::domain::{FitConfig, FitStats, GenerateConfig, PredictConfig};
use crate::error::AppError;
use crate::io::matrix::{load_matrix, load_vector, split_responses};
use crate::models::LinearRegression;

/// All computed outputs of a single `olsfit fit` run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub model: LinearRegression,
    pub stats: FitStats,
    /// Predictions for `config.test`, when given.
    pub predictions: Option<DVector<f64>>,
}

/// Load training data (and optional responses file).
pub fn load_training_data(config: &FitConfig) -> Result<(DMatrix<f64>, DVector<f64>), AppError> {
    let table = load_matrix(&config.input, &config.format)?;
    match &config.responses {
        Some(path) => {
            let responses = load_vector(path, &config.format)?;
            Ok((table, responses))
        }
        None => {
            if table.ncols() < 2 {
                log::warn!(
                    "'{}' has a single column; fitting an intercept-only model",
                    config.input.display()
                );
            }
            Ok(split_responses(table)?)
        }
    }
}

/// Execute the fit pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<FitRun, AppError> {
    let (predictors, responses) = load_training_data(config)?;

    let model = LinearRegression::fit_with_options(&predictors, &responses, &config.options)?;
    let stats = crate::report::compute_fit_stats(&model, &predictors, &responses)?;

    let predictions = match &config.test {
        Some(path) => {
            let points = load_matrix(path, &config.format)?;
            Some(model.predict(&points)?)
        }
        None => None,
    };

    Ok(FitRun {
        model,
        stats,
        predictions,
    })
}

/// Load a saved model and predict on the configured points.
pub fn run_predict(config: &PredictConfig) -> Result<DVector<f64>, AppError> {
    let model = LinearRegression::load(&config.model)?;
    let points = load_matrix(&config.test, &config.format)?;
    Ok(model.predict(&points)?)
}

/// Generate a synthetic dataset and write it to `config.output`.
pub fn run_generate(config: &GenerateConfig) -> Result<SampleData, AppError> {
    let sample = generate_linear_sample(config)?;
    crate::io::export::write_dataset_csv(&config.output, &sample.predictors, &sample.responses)?;
    Ok(sample)
}
