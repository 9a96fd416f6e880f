//! Cleaning stages for the KSI collision table.
//!
//! Every stage takes the whole [`polars::prelude::DataFrame`] and mutates it in
//! place, degrading unparseable cells to null rather than failing:
//!
//! - [`datetime`]: typed `date`, `time_str`, `hour`, `minute`, `datetime`
//! - [`geometry`]: `lon`/`lat` centroid from the `geometry` JSON
//! - [`bounds`]: coupled nulling of coordinates outside the validity box
//! - [`text`]: whitespace trimming of string columns
//! - [`aggregate`]: person rows collapsed to collision rows with a `rows` count
//!
//! [`clean_records`] chains the per-row stages in order.

pub mod aggregate;
pub mod bounds;
pub mod datetime;
pub mod error;
pub mod geometry;
pub mod records;
pub mod text;

pub use aggregate::{CollisionTable, aggregate_collisions, collision_key, total_rows};
pub use error::{Result, TransformError};
pub use geometry::{Centroid, GeometryError, GeometryOutcome, extract_centroid};
pub use records::{CleanedRecords, clean_records};
