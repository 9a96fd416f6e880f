//! Free-text normalization.

use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Strip leading/trailing whitespace from every `String` column.
///
/// Typed columns (dates, numbers) are left untouched. Returns the number of
/// columns processed.
pub fn trim_text_columns(df: &mut DataFrame) -> Result<usize> {
    let text_columns: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().clone())
        .collect();

    for name in &text_columns {
        let trimmed = {
            let ca = df.column(name.as_str())?.str()?;
            let values: Vec<Option<&str>> = ca.into_iter().map(|v| v.map(str::trim)).collect();
            Series::new(name.clone(), values)
        };
        df.with_column(trimmed)?;
    }

    debug!(columns = text_columns.len(), "trimmed text columns");
    Ok(text_columns.len())
}
