//! Output generation for the cleaned KSI tables.
//!
//! Dates are written as `YYYY-MM-DD`, datetimes as `YYYY-MM-DD HH:MM:SS`
//! and nulls as empty fields.

mod error;
mod writer;

pub use error::{OutputError, Result};
pub use writer::{prepare_output_dir, write_collision_table, write_person_table};
