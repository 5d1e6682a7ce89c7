//! Export predictions and synthetic datasets to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts, and the dataset export can be fed straight back into `olsfit fit`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::error::RegressionError;

/// Write one prediction per line under a `prediction` header.
pub fn write_predictions_csv(path: &Path, predictions: &DVector<f64>) -> Result<(), RegressionError> {
    let mut writer = create(path)?;
    let write_err = |e: std::io::Error| RegressionError::storage(path, format!("write error: {e}"));

    writeln!(writer, "prediction").map_err(write_err)?;
    for v in predictions.iter() {
        writeln!(writer, "{v:?}").map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

/// Write a training table: feature columns `x1..xk` followed by the response `y`.
pub fn write_dataset_csv(
    path: &Path,
    predictors: &DMatrix<f64>,
    responses: &DVector<f64>,
) -> Result<(), RegressionError> {
    if predictors.nrows() != responses.len() {
        return Err(RegressionError::DimensionMismatch {
            context: "dataset responses",
            expected: predictors.nrows(),
            found: responses.len(),
        });
    }

    let mut writer = create(path)?;
    let write_err = |e: std::io::Error| RegressionError::storage(path, format!("write error: {e}"));

    // Header
    let mut header: Vec<String> = (1..=predictors.ncols()).map(|i| format!("x{i}")).collect();
    header.push("y".to_string());
    writeln!(writer, "{}", header.join(",")).map_err(write_err)?;

    for (row, y) in predictors.row_iter().zip(responses.iter()) {
        let mut fields: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
        fields.push(format!("{y:?}"));
        writeln!(writer, "{}", fields.join(",")).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, RegressionError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| RegressionError::storage(path, format!("failed to create: {e}")))
}
