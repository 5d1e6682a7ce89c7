//! `olsfit` library crate.
//!
//! Ordinary least squares linear regression: fit a coefficient vector (intercept
//! first) with a QR-based solver, predict on new points, and save/load the
//! coefficients.
//!
//! The binary (`olsfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the model can be embedded without the CLI

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use error::RegressionError;
pub use models::{FitOptions, LinearRegression};
