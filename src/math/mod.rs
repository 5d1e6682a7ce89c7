//! Mathematical utilities: design-matrix augmentation and the QR least squares solver.

pub mod ols;

pub use ols::*;
