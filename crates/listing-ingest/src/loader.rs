//! CSV loading for listing datasets.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, NamedFrom, Series, SerReader};
use tracing::info;

use listing_model::{AuditError, Result, columns, missing_columns};

use crate::cell::any_to_f64;

/// Rows the CSV reader samples when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Loads a listing CSV into a `DataFrame` ready for rule evaluation.
///
/// Verifies encoding and required columns up front and attaches the derived
/// `listing_levels_numeric` column, so later stages can assume a complete
/// schema and never fail on a column lookup.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;
    let mut df = read_frame(path)?;
    validate_shape(&df, path)?;
    check_required_columns(&df)?;
    attach_levels_numeric(&mut df)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded listing dataset"
    );
    Ok(df)
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AuditError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AuditError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| AuditError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(AuditError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(AuditError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable; the CSV reader strips it.
    Ok(())
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| AuditError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| AuditError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn validate_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(AuditError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(AuditError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

fn check_required_columns(df: &DataFrame) -> Result<()> {
    let names = df.get_column_names();
    let missing = missing_columns(names.iter().map(|name| name.as_str()));
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuditError::MissingColumns { columns: missing })
    }
}

/// Coerces `listing_levels` into a Float64 companion column; cells that do
/// not parse become null rather than failing the load.
fn attach_levels_numeric(df: &mut DataFrame) -> Result<()> {
    let column = df
        .column(columns::LISTING_LEVELS)
        .map_err(|e| AuditError::Message(e.to_string()))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_f64(value));
    }
    let series = Series::new(columns::LISTING_LEVELS_NUMERIC.into(), values);
    df.with_column(series)
        .map_err(|e| AuditError::Message(e.to_string()))?;
    Ok(())
}
