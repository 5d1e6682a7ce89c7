//! Read/write the coefficient vector.
//!
//! The coefficient vector is the whole model, so this is the model file format.
//! Two encodings are supported, picked by file extension:
//!
//! - `.json`: `domain::ModelFile` (parameters plus a little metadata)
//! - anything else: plain text, one coefficient per line, intercept first
//!
//! Text output uses `{:?}` formatting, which prints the shortest decimal that
//! parses back to the same `f64`, so a save/load cycle is exact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use nalgebra::DVector;

use crate::domain::ModelFile;
use crate::error::RegressionError;
use crate::io::matrix::{load_vector, MatrixFormat};

/// Write the coefficient vector to `path`.
pub fn save_parameters(path: &Path, parameters: &DVector<f64>) -> Result<(), RegressionError> {
    let file = File::create(path).map_err(|e| RegressionError::storage(path, format!("failed to create: {e}")))?;
    let mut writer = BufWriter::new(file);

    if is_json(path) {
        let model = ModelFile {
            tool: "olsfit".to_string(),
            created_at: Utc::now(),
            n_features: parameters.len().saturating_sub(1),
            parameters: parameters.iter().copied().collect(),
        };
        serde_json::to_writer_pretty(&mut writer, &model)
            .map_err(|e| RegressionError::storage(path, format!("failed to write model JSON: {e}")))?;
    } else {
        for v in parameters.iter() {
            writeln!(writer, "{v:?}").map_err(|e| RegressionError::storage(path, format!("write error: {e}")))?;
        }
    }

    writer
        .flush()
        .map_err(|e| RegressionError::storage(path, format!("write error: {e}")))?;
    log::info!("Saved {} parameters to '{}'", parameters.len(), path.display());
    Ok(())
}

/// Read a coefficient vector previously written by `save_parameters`.
pub fn load_parameters(path: &Path) -> Result<DVector<f64>, RegressionError> {
    let parameters = if is_json(path) {
        let file = File::open(path).map_err(|e| RegressionError::storage(path, format!("failed to open: {e}")))?;
        let model: ModelFile = serde_json::from_reader(file)
            .map_err(|e| RegressionError::storage(path, format!("invalid model JSON: {e}")))?;
        if model.parameters.len() != model.n_features + 1 {
            return Err(RegressionError::storage(
                path,
                format!(
                    "model declares {} features but stores {} parameters",
                    model.n_features,
                    model.parameters.len()
                ),
            ));
        }
        DVector::from_vec(model.parameters)
    } else {
        let format = MatrixFormat {
            detect_header: false,
            ..MatrixFormat::default()
        };
        load_vector(path, &format)?
    };

    if parameters.is_empty() {
        return Err(RegressionError::storage(path, "no parameters stored"));
    }
    if !parameters.iter().all(|v| v.is_finite()) {
        return Err(RegressionError::storage(path, "non-finite parameter"));
    }
    Ok(parameters)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn awkward_parameters() -> DVector<f64> {
        DVector::from_row_slice(&[0.1, -2.0 / 3.0, 1e-300, 123_456_789.123_456_78, -0.0])
    }

    #[test]
    fn text_round_trip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.csv");
        let params = awkward_parameters();

        save_parameters(&path, &params).unwrap();
        let loaded = load_parameters(&path).unwrap();
        assert_eq!(loaded, params);
    }

    #[test]
    fn json_round_trip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        let params = awkward_parameters();

        save_parameters(&path, &params).unwrap();
        let loaded = load_parameters(&path).unwrap();
        assert_eq!(loaded, params);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"n_features\": 4"));
    }

    #[test]
    fn json_with_inconsistent_feature_count_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"tool":"olsfit","created_at":"2025-01-01T00:00:00Z","n_features":3,"parameters":[1.0,2.0]}"#,
        )
        .unwrap();

        let err = load_parameters(&path).unwrap_err();
        assert!(err.to_string().contains("declares 3 features"));
    }

    #[test]
    fn missing_and_corrupt_files_fail() {
        let dir = TempDir::new().unwrap();
        assert!(load_parameters(&dir.path().join("absent.txt")).is_err());

        let corrupt = dir.path().join("corrupt.txt");
        std::fs::write(&corrupt, "1.0\nnot-a-number\n").unwrap();
        assert!(matches!(load_parameters(&corrupt), Err(RegressionError::Storage { .. })));

        let corrupt_json = dir.path().join("corrupt.json");
        std::fs::write(&corrupt_json, "{").unwrap();
        assert!(matches!(load_parameters(&corrupt_json), Err(RegressionError::Storage { .. })));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/model.txt");
        let err = save_parameters(&path, &DVector::from_row_slice(&[1.0])).unwrap_err();
        assert!(matches!(err, RegressionError::Storage { .. }));
    }
}
