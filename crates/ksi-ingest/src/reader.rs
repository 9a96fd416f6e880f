//! Raw CSV loading.

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::columns::normalize_columns;
use crate::error::{IngestError, Result};

/// A loaded raw table with normalized column names.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub data: DataFrame,
    /// Headers that collided after normalization and received a suffix.
    pub renamed_duplicates: usize,
}

/// Check that the input exists and is readable before handing it to Polars,
/// so a missing file surfaces as [`IngestError::FileNotFound`] rather than a
/// parser error.
pub fn check_input_file(path: &Path) -> Result<()> {
    std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(())
}

/// Reads a CSV file into a DataFrame where every column is `String`.
///
/// Schema inference is disabled: the KSI export mixes numeric-looking codes
/// with free text, and every downstream coercion is done explicitly per
/// column. Empty cells are read as null, quoted (`""`) or not.
pub fn read_csv_as_text(path: &Path) -> Result<DataFrame> {
    check_input_file(path)?;
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .finish()
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let emptied = empty_strings_to_null(&mut df)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        emptied,
        "read raw csv"
    );
    Ok(df)
}

/// Replace empty strings with null in every `String` column.
///
/// Polars keeps a quoted empty field as `""` but reads an unquoted one as
/// null. Returns the number of cells replaced.
pub fn empty_strings_to_null(df: &mut DataFrame) -> Result<usize> {
    let text_columns: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().clone())
        .collect();

    let mut replaced = 0usize;
    for name in &text_columns {
        let (series, count) = {
            let ca = df.column(name.as_str())?.str()?;
            let mut count = 0usize;
            let values: Vec<Option<&str>> = ca
                .into_iter()
                .map(|value| match value {
                    Some("") => {
                        count += 1;
                        None
                    }
                    other => other,
                })
                .collect();
            (Series::new(name.clone(), values), count)
        };
        if count > 0 {
            df.with_column(series)?;
            replaced += count;
        }
    }
    Ok(replaced)
}

/// Load the raw collision file and normalize its column names.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let mut data = read_csv_as_text(path)?;
    let renamed_duplicates = normalize_columns(&mut data)?;
    Ok(RawTable {
        data,
        renamed_duplicates,
    })
}
