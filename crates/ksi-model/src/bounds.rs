//! Geographic validity box for derived coordinates.

use serde::{Deserialize, Serialize};

/// Inclusive latitude/longitude box a centroid must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl GeoBounds {
    /// Greater Toronto sanity box.
    pub const TORONTO: GeoBounds = GeoBounds {
        lat_min: 43.0,
        lat_max: 44.2,
        lon_min: -80.5,
        lon_max: -78.5,
    };

    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max
    }

    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max
    }

    /// Returns true only when both coordinates are inside the box.
    ///
    /// NaN never passes either comparison, so it is treated as outside.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.contains_lat(lat) && self.contains_lon(lon)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::TORONTO
    }
}
