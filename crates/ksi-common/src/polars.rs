//! Polars cell helpers.
//!
//! The raw table is loaded with every column as `String`, so the stages read
//! cells as text and coerce them here.

use polars::prelude::*;

/// Reads every cell of a text column as an owned optional string.
///
/// Returns `None` when the column does not exist or is not `String` typed.
pub fn column_text_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let ca = df.column(name).ok()?.str().ok()?;
    Some(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
