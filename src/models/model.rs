//! The fitted linear model.
//!
//! A `LinearRegression` is nothing more than its coefficient vector:
//!
//! ```text
//! y = β0 + β1 x1 + ... + βk xk
//! ```
//!
//! stored intercept first. It is created by fitting on training data or by
//! loading a previously saved vector, and never changes afterwards.
//!
//! Matrices follow one convention throughout: rows are observations, columns
//! are features.

use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::error::RegressionError;
use crate::io::params::{load_parameters, save_parameters};
use crate::math::{augment_with_intercept, solve_least_squares, DEFAULT_RANK_TOL};

/// Options that affect how the least squares problem is solved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Relative pivot tolerance used to declare the design matrix rank deficient.
    pub rank_tol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            rank_tol: DEFAULT_RANK_TOL,
        }
    }
}

/// Ordinary least squares linear regression with an intercept term.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    parameters: DVector<f64>,
}

impl LinearRegression {
    /// Fit on `predictors` (n × k) and `responses` (length n).
    pub fn fit(predictors: &DMatrix<f64>, responses: &DVector<f64>) -> Result<Self, RegressionError> {
        Self::fit_with_options(predictors, responses, &FitOptions::default())
    }

    /// Fit with an explicit solver configuration (e.g. a custom rank tolerance).
    pub fn fit_with_options(
        predictors: &DMatrix<f64>,
        responses: &DVector<f64>,
        opts: &FitOptions,
    ) -> Result<Self, RegressionError> {
        let (n_obs, n_features) = predictors.shape();
        if responses.len() != n_obs {
            return Err(RegressionError::DimensionMismatch {
                context: "fit responses",
                expected: n_obs,
                found: responses.len(),
            });
        }
        if n_obs == 0 {
            return Err(RegressionError::EmptyInput("fit predictors"));
        }
        if !predictors.iter().all(|v| v.is_finite()) {
            return Err(RegressionError::NonFinite("fit predictors"));
        }
        if !responses.iter().all(|v| v.is_finite()) {
            return Err(RegressionError::NonFinite("fit responses"));
        }

        log::info!("Fitting linear model: {n_obs} observations, {n_features} features");

        let design = augment_with_intercept(predictors);
        let parameters = solve_least_squares(&design, responses, opts.rank_tol)?;

        log::info!("Fit complete: intercept {:.6}", parameters[0]);
        Ok(Self { parameters })
    }

    /// Build a model directly from a coefficient vector (intercept first).
    pub fn from_parameters(parameters: DVector<f64>) -> Result<Self, RegressionError> {
        if parameters.is_empty() {
            return Err(RegressionError::EmptyInput("parameters"));
        }
        if !parameters.iter().all(|v| v.is_finite()) {
            return Err(RegressionError::NonFinite("parameters"));
        }
        Ok(Self { parameters })
    }

    /// Load a model from a saved coefficient vector.
    pub fn load(path: &Path) -> Result<Self, RegressionError> {
        let parameters = load_parameters(path)?;
        log::info!(
            "Loaded model with {} features from '{}'",
            parameters.len() - 1,
            path.display()
        );
        Ok(Self { parameters })
    }

    /// Persist the coefficient vector.
    pub fn save(&self, path: &Path) -> Result<(), RegressionError> {
        save_parameters(path, &self.parameters)
    }

    /// Predict one value per row of `points` (m × k).
    pub fn predict(&self, points: &DMatrix<f64>) -> Result<DVector<f64>, RegressionError> {
        let n_features = self.n_features();
        if points.ncols() != n_features {
            return Err(RegressionError::DimensionMismatch {
                context: "predict features",
                expected: n_features,
                found: points.ncols(),
            });
        }

        let mut predictions = points * self.weights();
        predictions.add_scalar_mut(self.intercept());
        Ok(predictions)
    }

    /// Mean squared error of the predictions on `points` against `responses`.
    pub fn compute_error(&self, points: &DMatrix<f64>, responses: &DVector<f64>) -> Result<f64, RegressionError> {
        if responses.len() != points.nrows() {
            return Err(RegressionError::DimensionMismatch {
                context: "error responses",
                expected: points.nrows(),
                found: responses.len(),
            });
        }
        if points.nrows() == 0 {
            return Err(RegressionError::EmptyInput("error points"));
        }

        let residuals = responses - self.predict(points)?;
        Ok(residuals.norm_squared() / points.nrows() as f64)
    }

    /// The full coefficient vector, intercept first.
    pub fn parameters(&self) -> &DVector<f64> {
        &self.parameters
    }

    /// The constant term `β0`.
    pub fn intercept(&self) -> f64 {
        self.parameters[0]
    }

    /// The per-feature coefficients (everything after the intercept).
    pub fn weights(&self) -> DVector<f64> {
        self.parameters.rows(1, self.n_features()).into_owned()
    }

    /// Number of features the model expects in each prediction row.
    pub fn n_features(&self) -> usize {
        self.parameters.len() - 1
    }
}
