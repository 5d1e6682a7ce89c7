//! Reporting utilities: residual statistics and formatted terminal output.

pub mod format;

pub use format::*;

use nalgebra::{DMatrix, DVector};

use crate::domain::FitStats;
use crate::error::RegressionError;
use crate::models::LinearRegression;

/// Compute training-set residual statistics for a fitted model.
pub fn compute_fit_stats(
    model: &LinearRegression,
    predictors: &DMatrix<f64>,
    responses: &DVector<f64>,
) -> Result<FitStats, RegressionError> {
    let mse = model.compute_error(predictors, responses)?;
    let residuals = responses - model.predict(predictors)?;

    Ok(FitStats {
        n_obs: predictors.nrows(),
        n_features: predictors.ncols(),
        mse,
        rmse: mse.sqrt(),
        residual_min: residuals.min(),
        residual_max: residuals.max(),
    })
}
