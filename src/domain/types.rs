//! Shared domain types.
//!
//! Run configurations are plain structs resolved from CLI flags in `app`, so the
//! pipeline can be driven (and tested) without going through argument parsing.
//! `ModelFile` is the serializable form of a fitted model.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::matrix::MatrixFormat;
use crate::models::FitOptions;

/// A saved model file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub created_at: DateTime<Utc>,
    pub n_features: usize,
    /// Coefficients, intercept first.
    pub parameters: Vec<f64>,
}

/// Configuration for `olsfit fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    /// Separate responses file; when absent the last input column is the response.
    pub responses: Option<PathBuf>,
    pub format: MatrixFormat,
    pub options: FitOptions,

    pub output_model: Option<PathBuf>,
    pub test: Option<PathBuf>,
    pub output_predictions: Option<PathBuf>,
}

/// Configuration for `olsfit predict`.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub model: PathBuf,
    pub test: PathBuf,
    pub format: MatrixFormat,
    pub output_predictions: Option<PathBuf>,
}

/// Configuration for `olsfit generate`.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// True coefficients, intercept first.
    pub coefficients: Vec<f64>,
    pub n_obs: usize,
    /// Standard deviation of the Gaussian noise added to each response.
    pub noise_std: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub seed: u64,
    pub output: PathBuf,
}

/// Summary stats about a training set and its fit.
#[derive(Debug, Clone)]
pub struct FitStats {
    pub n_obs: usize,
    pub n_features: usize,
    pub mse: f64,
    pub rmse: f64,
    pub residual_min: f64,
    pub residual_max: f64,
}
