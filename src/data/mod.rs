//! Data sources.
//!
//! - synthetic datasets from a known linear model (`sample`)

pub mod sample;

pub use sample::*;
