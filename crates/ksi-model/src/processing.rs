use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default raw input, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "data/raw/ksi_collisions.csv";
/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";

pub const PERSON_LEVEL_FILE: &str = "ksi_person_level_clean.csv";
pub const COLLISION_LEVEL_FILE: &str = "ksi_collision_level_clean.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub person_level: PathBuf,
    pub collision_level: PathBuf,
}

impl OutputPaths {
    /// Place both output files inside `output_dir`.
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            person_level: output_dir.join(PERSON_LEVEL_FILE),
            collision_level: output_dir.join(COLLISION_LEVEL_FILE),
        }
    }
}
