//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/model code stays clean and testable
//! - output changes are localized

use nalgebra::DVector;

use crate::domain::{FitConfig, FitStats};
use crate::models::LinearRegression;

/// Format the fit summary (dataset shape + coefficients + training error).
pub fn format_fit_summary(config: &FitConfig, stats: &FitStats, model: &LinearRegression) -> String {
    let mut out = String::new();

    out.push_str("=== olsfit - Ordinary Least Squares ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    match &config.responses {
        Some(path) => out.push_str(&format!("Responses: {}\n", path.display())),
        None => out.push_str("Responses: last input column\n"),
    }
    out.push_str(&format!(
        "Data: n={} observations | k={} features\n",
        stats.n_obs, stats.n_features
    ));

    out.push_str("\nCoefficients:\n");
    out.push_str(&format_coefficients(model.parameters()));

    out.push_str("\nTraining error:\n");
    out.push_str(&format!("- MSE : {:.6e}\n", stats.mse));
    out.push_str(&format!("- RMSE: {:.6e}\n", stats.rmse));
    out.push_str(&format!(
        "- residuals: [{:.6e}, {:.6e}]\n",
        stats.residual_min, stats.residual_max
    ));

    out
}

/// Format the coefficient table, intercept first.
pub fn format_coefficients(parameters: &DVector<f64>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<12} {:>18}\n", "term", "estimate"));
    out.push_str(&format!("{:-<12} {:-<18}\n", "", ""));

    for (i, beta) in parameters.iter().enumerate() {
        let term = if i == 0 {
            "(intercept)".to_string()
        } else {
            format!("x{i}")
        };
        out.push_str(&format!("{term:<12} {beta:>18.10}\n"));
    }

    out
}

/// Format predictions one per line, showing at most `limit` rows.
pub fn format_predictions(predictions: &DVector<f64>, limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Predictions (n={}):\n", predictions.len()));

    for (j, y) in predictions.iter().take(limit).enumerate() {
        out.push_str(&format!("{j:>6} {y:>18.10}\n"));
    }
    if predictions.len() > limit {
        out.push_str(&format!("   ... {} more\n", predictions.len() - limit));
    }

    out
}
