//! Error types.
//!
//! - `RegressionError` is what the library returns. Each variant is local to the
//!   call that produced it.
//! - `AppError` is what the `olsfit` binary reports: a message plus the process
//!   exit code.

use std::path::Path;

use thiserror::Error;

/// Errors produced by fitting, prediction and model storage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// The augmented design matrix does not have full column rank
    /// (too few observations or collinear features).
    #[error("design matrix is rank deficient: rank {rank} < {parameters} parameters")]
    RankDeficient { rank: usize, parameters: usize },

    #[error("storage error for '{path}': {message}")]
    Storage { path: String, message: String },
}

impl RegressionError {
    pub fn storage(path: &Path, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<RegressionError> for AppError {
    fn from(err: RegressionError) -> Self {
        let exit_code = match &err {
            RegressionError::Storage { .. } => 2,
            RegressionError::DimensionMismatch { .. }
            | RegressionError::EmptyInput(_)
            | RegressionError::NonFinite(_) => 3,
            RegressionError::RankDeficient { .. } => 4,
        };
        Self::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
