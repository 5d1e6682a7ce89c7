//! Dense numeric matrix ingest.
//!
//! Turns a delimited text file into a `DMatrix<f64>` with one row per line
//! (rows = observations, columns = features).
//!
//! - `.csv` files are comma separated, `.tsv` tab separated, anything else is
//!   split on runs of whitespace (unless a delimiter is given explicitly)
//! - an optional header line is skipped when none of the first record's cells is numeric
//! - `#` starts a comment line, blank lines are ignored
//! - every other malformed input is an error naming the file and line; nothing is
//!   skipped silently

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::error::RegressionError;

/// How to read a matrix file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixFormat {
    /// Field delimiter. `None` picks one from the file extension.
    pub delimiter: Option<u8>,
    /// Skip the first record if none of its cells is numeric.
    pub detect_header: bool,
}

impl Default for MatrixFormat {
    fn default() -> Self {
        Self {
            delimiter: None,
            detect_header: true,
        }
    }
}

/// A record read from the file, before numeric parsing.
struct RawRow {
    line: usize,
    cells: Vec<String>,
}

/// Load a dense matrix.
pub fn load_matrix(path: &Path, format: &MatrixFormat) -> Result<DMatrix<f64>, RegressionError> {
    let rows = match format.delimiter.or_else(|| delimiter_for(path)) {
        Some(delimiter) => read_delimited(path, delimiter)?,
        None => read_whitespace(path)?,
    };

    let mut rows = rows.into_iter().peekable();
    if format.detect_header
        && rows
            .peek()
            .is_some_and(|row| row.cells.iter().all(|c| c.parse::<f64>().is_err()))
    {
        if let Some(header) = rows.next() {
            log::debug!("Skipping header line {} of '{}'", header.line, path.display());
        }
    }

    let mut values = Vec::new();
    let mut n_rows = 0usize;
    let mut n_cols = None;

    for row in rows {
        let width = *n_cols.get_or_insert(row.cells.len());
        if row.cells.len() != width {
            return Err(RegressionError::storage(
                path,
                format!("line {}: expected {width} columns, found {}", row.line, row.cells.len()),
            ));
        }
        for (col, cell) in row.cells.iter().enumerate() {
            values.push(parse_cell(path, row.line, col, cell)?);
        }
        n_rows += 1;
    }

    let n_cols = match n_cols {
        Some(c) if c > 0 => c,
        _ => return Err(RegressionError::storage(path, "no numeric rows")),
    };

    log::debug!("Loaded {n_rows}x{n_cols} matrix from '{}'", path.display());
    Ok(DMatrix::from_row_slice(n_rows, n_cols, &values))
}

/// Load a vector stored as a single column or a single row.
pub fn load_vector(path: &Path, format: &MatrixFormat) -> Result<DVector<f64>, RegressionError> {
    let m = load_matrix(path, format)?;
    if m.ncols() != 1 && m.nrows() != 1 {
        return Err(RegressionError::storage(
            path,
            format!("expected a single row or column, found a {}x{} matrix", m.nrows(), m.ncols()),
        ));
    }
    Ok(DVector::from_column_slice(m.as_slice()))
}

/// Split a training table whose last column holds the responses.
pub fn split_responses(table: DMatrix<f64>) -> Result<(DMatrix<f64>, DVector<f64>), RegressionError> {
    let n_cols = table.ncols();
    if n_cols == 0 {
        return Err(RegressionError::EmptyInput("training table"));
    }
    let responses = table.column(n_cols - 1).into_owned();
    let predictors = table.remove_column(n_cols - 1);
    Ok((predictors, responses))
}

fn delimiter_for(path: &Path) -> Option<u8> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("csv") {
        Some(b',')
    } else if ext.eq_ignore_ascii_case("tsv") {
        Some(b'\t')
    } else {
        None
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRow>, RegressionError> {
    let file = File::open(path).map_err(|e| RegressionError::storage(path, format!("failed to open: {e}")))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .delimiter(delimiter)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| RegressionError::storage(path, format!("CSV parse error: {e}")))?;
        let line = record.position().map_or(idx + 1, |p| p.line() as usize);
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(RawRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

fn read_whitespace(path: &Path) -> Result<Vec<RawRow>, RegressionError> {
    let file = File::open(path).map_err(|e| RegressionError::storage(path, format!("failed to open: {e}")))?;

    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| RegressionError::storage(path, format!("read error: {e}")))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        rows.push(RawRow {
            line: idx + 1,
            cells: trimmed.split_whitespace().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

fn parse_cell(path: &Path, line: usize, col: usize, cell: &str) -> Result<f64, RegressionError> {
    let v = cell.parse::<f64>().map_err(|_| {
        RegressionError::storage(path, format!("line {line}, column {}: '{cell}' is not a number", col + 1))
    })?;
    if !v.is_finite() {
        return Err(RegressionError::storage(
            path,
            format!("line {line}, column {}: non-finite value '{cell}'", col + 1),
        ));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_with_header_is_loaded_row_major() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.csv", "x1,x2,y\n1,4,3\n2,5,5\n3,6,7\n");

        let m = load_matrix(&path, &MatrixFormat::default()).unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(2, 2)], 7.0);
    }

    #[test]
    fn whitespace_text_with_comments() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.txt", "# generated\n1.5   2\n\n  -3e2\t4\n");

        let m = load_matrix(&path, &MatrixFormat::default()).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m[(1, 0)], -300.0);
    }

    #[test]
    fn ragged_rows_report_line_number() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.csv", "1,2\n3,4\n5\n");

        let err = load_matrix(&path, &MatrixFormat::default()).unwrap_err();
        match err {
            RegressionError::Storage { message, .. } => assert!(message.contains("line 3"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_after_header_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.csv", "a,b\n1,2\n3,oops\n");

        let err = load_matrix(&path, &MatrixFormat::default()).unwrap_err();
        assert!(err.to_string().contains("'oops' is not a number"));
    }

    #[test]
    fn malformed_first_row_is_not_taken_for_a_header() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.csv", "1,2x,3\n4,5,6\n");

        let err = load_matrix(&path, &MatrixFormat::default()).unwrap_err();
        match err {
            RegressionError::Storage { message, .. } => {
                assert!(message.contains("line 1, column 2"), "{message}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn header_detection_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "x.csv", "a,b\n1,2\n");
        let format = MatrixFormat {
            detect_header: false,
            ..MatrixFormat::default()
        };

        assert!(load_matrix(&path, &format).is_err());
    }

    #[test]
    fn missing_and_empty_files_are_storage_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            load_matrix(&missing, &MatrixFormat::default()),
            Err(RegressionError::Storage { .. })
        ));

        let empty = write_file(&dir, "empty.csv", "");
        assert!(matches!(
            load_matrix(&empty, &MatrixFormat::default()),
            Err(RegressionError::Storage { .. })
        ));
    }

    #[test]
    fn vector_accepts_row_or_column() {
        let dir = TempDir::new().unwrap();
        let col = write_file(&dir, "col.csv", "1\n2\n3\n");
        let row = write_file(&dir, "row.csv", "1,2,3\n");
        let grid = write_file(&dir, "grid.csv", "1,2\n3,4\n");

        let expected = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(load_vector(&col, &MatrixFormat::default()).unwrap(), expected);
        assert_eq!(load_vector(&row, &MatrixFormat::default()).unwrap(), expected);
        assert!(load_vector(&grid, &MatrixFormat::default()).is_err());
    }

    #[test]
    fn split_responses_takes_last_column() {
        let table = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 10.0, 3.0, 4.0, 20.0]);
        let (x, y) = split_responses(table).unwrap();

        assert_eq!(x, DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(y, DVector::from_row_slice(&[10.0, 20.0]));
    }
}
