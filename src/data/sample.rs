//! Synthetic datasets drawn from a known linear model.
//!
//! Features are drawn uniformly from `[x_min, x_max]`, responses are
//!
//! ```text
//! y = β0 + Σ βi xi + ε,   ε ~ N(0, noise_std²)
//! ```
//!
//! The generator is seeded, so the same config always yields the same data.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::GenerateConfig;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct SampleData {
    pub predictors: DMatrix<f64>,
    pub responses: DVector<f64>,
    /// Noise-free responses, useful for checking recovered fits.
    pub baseline: DVector<f64>,
}

pub fn generate_linear_sample(config: &GenerateConfig) -> Result<SampleData, AppError> {
    if config.coefficients.is_empty() {
        return Err(AppError::new(2, "At least one coefficient (the intercept) is required."));
    }
    if !config.coefficients.iter().all(|v| v.is_finite()) {
        return Err(AppError::new(2, "Coefficients must be finite."));
    }
    if config.n_obs == 0 {
        return Err(AppError::new(2, "Observation count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid feature range for sample generation."));
    }
    if !(config.noise_std.is_finite() && config.noise_std >= 0.0) {
        return Err(AppError::new(2, "Noise standard deviation must be finite and >= 0."));
    }

    let n_features = config.coefficients.len() - 1;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise_std)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let predictors = DMatrix::from_fn(config.n_obs, n_features, |_, _| {
        rng.gen_range(config.x_min..=config.x_max)
    });

    let beta = DVector::from_column_slice(&config.coefficients);
    let weights = beta.rows(1, n_features);
    let mut baseline = &predictors * weights;
    baseline.add_scalar_mut(beta[0]);

    let responses = baseline.map(|y| y + normal.sample(&mut rng));

    log::debug!(
        "Generated {} observations with {n_features} features (seed {})",
        config.n_obs,
        config.seed
    );

    Ok(SampleData {
        predictors,
        responses,
        baseline,
    })
}
