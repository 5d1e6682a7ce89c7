//! Input/output helpers.
//!
//! - numeric matrix/vector ingest (`matrix`)
//! - coefficient vector read/write, i.e. the model file (`params`)
//! - prediction and dataset exports (`export`)

pub mod export;
pub mod matrix;
pub mod params;

pub use export::*;
pub use matrix::*;
pub use params::*;
