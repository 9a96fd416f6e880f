//! Shared utilities for the KSI cleaner crates.
//!
//! Polars helpers used by the transform stages to read cells as text and
//! coerce them to numbers.

pub mod polars;

pub use polars::{column_text_values, parse_f64, parse_i64};
