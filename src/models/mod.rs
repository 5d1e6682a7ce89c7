//! Linear model implementation.
//!
//! `LinearRegression` owns the coefficient vector and exposes fit / predict /
//! load / save on top of the solver in `math`.

pub mod model;

pub use model::*;
