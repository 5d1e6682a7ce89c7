//! Command-line parsing for the least squares fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! model/math code. Flags are resolved into `domain` configs in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "olsfit", version, about = "Ordinary least squares linear regression")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a model on training data, print diagnostics, and optionally save it / predict.
    Fit(FitArgs),
    /// Predict with a previously saved model.
    Predict(PredictArgs),
    /// Write a synthetic dataset drawn from a known linear model.
    Generate(GenerateArgs),
}

/// Matrix file parsing options shared by all commands that read data.
#[derive(Debug, Args, Clone)]
pub struct FormatArgs {
    /// Field delimiter (single character). Defaults to ',' for .csv, tab for .tsv,
    /// whitespace otherwise.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Treat every line as data (do not skip a non-numeric first line).
    #[arg(long)]
    pub no_header_detect: bool,
}

/// Options for fitting.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Training data, one observation per row.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: PathBuf,

    /// Responses, one per observation. If omitted, the last column of --input is used.
    #[arg(short = 'r', long, value_name = "FILE")]
    pub responses: Option<PathBuf>,

    /// Save the fitted coefficients (.json for a model file, anything else for plain text).
    #[arg(short = 'o', long = "output-model", value_name = "FILE")]
    pub output_model: Option<PathBuf>,

    /// Points to predict after fitting.
    #[arg(short = 't', long, value_name = "FILE")]
    pub test: Option<PathBuf>,

    /// Write predictions for --test to CSV.
    #[arg(short = 'p', long = "output-predictions", value_name = "FILE")]
    pub output_predictions: Option<PathBuf>,

    /// Relative pivot tolerance below which the design matrix is rank deficient.
    #[arg(long, default_value_t = crate::math::DEFAULT_RANK_TOL)]
    pub rank_tol: f64,

    #[command(flatten)]
    pub format: FormatArgs,
}

/// Options for predicting with a saved model.
#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Model file produced by `olsfit fit --output-model`.
    #[arg(short = 'm', long, value_name = "FILE")]
    pub model: PathBuf,

    /// Points to predict, one observation per row.
    #[arg(short = 't', long, value_name = "FILE")]
    pub test: PathBuf,

    /// Write predictions to CSV (otherwise they are printed).
    #[arg(short = 'p', long = "output-predictions", value_name = "FILE")]
    pub output_predictions: Option<PathBuf>,

    #[command(flatten)]
    pub format: FormatArgs,
}

/// Options for synthetic data generation.
#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// True coefficients, intercept first (e.g. `1,2,3`).
    #[arg(short = 'c', long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true, required = true)]
    pub coefficients: Vec<f64>,

    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub n_obs: usize,

    /// Standard deviation of Gaussian noise added to the responses.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Lower bound of the uniform feature distribution.
    #[arg(long, default_value_t = -10.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Upper bound of the uniform feature distribution.
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV (features then response column `y`).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: PathBuf,
}
