use std::path::PathBuf;

use ksi_model::{CleaningStats, OutputPaths};

/// Everything a finished run reports.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub input: PathBuf,
    pub outputs: OutputPaths,
    /// Rows in the person-level table (equal to the input row count).
    pub person_rows: usize,
    /// Distinct collisions in the aggregate.
    pub collision_rows: usize,
    /// Columns used to group collisions.
    pub collision_key: Vec<String>,
    pub stats: CleaningStats,
}
