//! KSI raw data ingestion.
//!
//! Loads the raw collision export into a Polars DataFrame with every column
//! typed as text, then normalizes the column names so later stages can
//! address them as `date`, `time`, `geometry`, `hood_158` and so on.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ksi_ingest::read_raw_table;
//!
//! let raw = read_raw_table(Path::new("data/raw/ksi_collisions.csv"))?;
//! println!("{} rows", raw.data.height());
//! ```

mod columns;
mod error;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Column Names ===
pub use columns::{normalize_column_name, normalize_column_names, normalize_columns};

// === CSV Reading ===
pub use reader::{
    RawTable, check_input_file, empty_strings_to_null, read_csv_as_text, read_raw_table,
};
