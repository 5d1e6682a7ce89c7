//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the logger
//! - parses CLI arguments into run configs
//! - runs the fit / predict / generate pipelines
//! - prints reports and writes optional exports

use std::path::Path;

use clap::Parser;

use crate::cli::{Command, FitArgs, FormatArgs, GenerateArgs, PredictArgs};
use crate::domain::{FitConfig, GenerateConfig, PredictConfig};
use crate::error::AppError;
use crate::io::matrix::MatrixFormat;
use crate::models::FitOptions;

pub mod pipeline;

/// Environment variable holding the log filter (e.g. `debug`, `olsfit=info`).
pub const LOG_ENV: &str = "OLSFIT_LOG";

/// Maximum number of predictions echoed to the terminal.
const PRINT_LIMIT: usize = 20;

/// Entry point for the `olsfit` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(&fit_config_from_args(&args)?),
        Command::Predict(args) => handle_predict(&predict_config_from_args(&args)?),
        Command::Generate(args) => handle_generate(&generate_config_from_args(&args)),
    }
}

fn handle_fit(config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(config)?;

    println!(
        "{}",
        crate::report::format_fit_summary(config, &run.stats, &run.model)
    );

    if let Some(path) = &config.output_model {
        run.model.save(path)?;
        println!("Model saved to {}", path.display());
    }

    if let Some(predictions) = &run.predictions {
        emit_predictions(predictions, config.output_predictions.as_deref())?;
    } else if config.output_predictions.is_some() {
        log::warn!("--output-predictions given without --test; nothing to write");
    }

    Ok(())
}

fn handle_predict(config: &PredictConfig) -> Result<(), AppError> {
    let predictions = pipeline::run_predict(config)?;
    emit_predictions(&predictions, config.output_predictions.as_deref())
}

fn handle_generate(config: &GenerateConfig) -> Result<(), AppError> {
    let sample = pipeline::run_generate(config)?;
    println!(
        "Wrote {} observations x {} features to {}",
        sample.predictors.nrows(),
        sample.predictors.ncols(),
        config.output.display()
    );
    Ok(())
}

fn emit_predictions(predictions: &nalgebra::DVector<f64>, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => {
            crate::io::export::write_predictions_csv(path, predictions)?;
            println!("Predictions ({}) written to {}", predictions.len(), path.display());
        }
        None => println!("{}", crate::report::format_predictions(predictions, PRINT_LIMIT)),
    }
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if !(args.rank_tol.is_finite() && args.rank_tol >= 0.0) {
        return Err(AppError::new(2, "--rank-tol must be finite and >= 0."));
    }
    Ok(FitConfig {
        input: args.input.clone(),
        responses: args.responses.clone(),
        format: matrix_format_from_args(&args.format)?,
        options: FitOptions {
            rank_tol: args.rank_tol,
        },
        output_model: args.output_model.clone(),
        test: args.test.clone(),
        output_predictions: args.output_predictions.clone(),
    })
}

pub fn predict_config_from_args(args: &PredictArgs) -> Result<PredictConfig, AppError> {
    Ok(PredictConfig {
        model: args.model.clone(),
        test: args.test.clone(),
        format: matrix_format_from_args(&args.format)?,
        output_predictions: args.output_predictions.clone(),
    })
}

pub fn generate_config_from_args(args: &GenerateArgs) -> GenerateConfig {
    GenerateConfig {
        coefficients: args.coefficients.clone(),
        n_obs: args.n_obs,
        noise_std: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
        seed: args.seed,
        output: args.output.clone(),
    }
}

fn matrix_format_from_args(args: &FormatArgs) -> Result<MatrixFormat, AppError> {
    let delimiter = match args.delimiter {
        None => None,
        Some(c) if c.is_ascii() => Some(c as u8),
        Some(c) => return Err(AppError::new(2, format!("Delimiter '{c}' must be a single ASCII character."))),
    };
    Ok(MatrixFormat {
        delimiter,
        detect_header: !args.no_header_detect,
    })
}
