//! Delimited output for the cleaned tables.

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{OutputError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Create the output directory (and parents) if it does not exist yet.
///
/// Writers never create directories themselves; call this once before the
/// first write.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!(dir = %dir.display(), "output directory ready");
    Ok(())
}

/// Write the person-level table, one row per input record.
pub fn write_person_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    write_csv(df, path)
}

/// Write the collision-level aggregate.
pub fn write_collision_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    write_csv(df, path)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| OutputError::CreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_date_format(Some(DATE_FORMAT.into()))
        .with_datetime_format(Some(DATETIME_FORMAT.into()))
        .finish(df)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV"
    );
    Ok(())
}
