//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configurations (`FitConfig`, `PredictConfig`, `GenerateConfig`)
//! - the serializable model file (`ModelFile`)
//! - fit diagnostics (`FitStats`)

pub mod types;

pub use types::*;
