//! Configuration options for a cleaning run.

use serde::{Deserialize, Serialize};

use crate::bounds::GeoBounds;
use crate::columns::COLLISION_KEY_COLUMNS;

/// Options for the collision cleaner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerOptions {
    /// Declared collision key; intersected with the table schema before grouping.
    pub collision_keys: Vec<String>,

    /// Box outside of which derived coordinates are nulled as a pair.
    pub bounds: GeoBounds,
}

impl Default for CleanerOptions {
    fn default() -> Self {
        Self {
            collision_keys: COLLISION_KEY_COLUMNS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            bounds: GeoBounds::TORONTO,
        }
    }
}

impl CleanerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_collision_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collision_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = bounds;
        self
    }
}
