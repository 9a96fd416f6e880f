pub mod bounds;
pub mod columns;
pub mod options;
pub mod processing;
pub mod stats;

pub use bounds::GeoBounds;
pub use columns::{ColumnRole, column_roles};
pub use options::CleanerOptions;
pub use processing::{
    COLLISION_LEVEL_FILE, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, OutputPaths, PERSON_LEVEL_FILE,
};
pub use stats::{CleaningStats, DateTimeCounts, GeometryCounts};
