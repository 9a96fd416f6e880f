//! Geographic bounds filter.
//!
//! A centroid is trusted only as a whole: if either coordinate is missing
//! or outside the validity box, both are nulled.

use polars::prelude::*;
use tracing::debug;

use ksi_model::GeoBounds;
use ksi_model::columns::{LAT, LON};

use crate::error::Result;

/// Apply the coupled-nulling rule to one pair.
///
/// # Examples
///
/// ```
/// use ksi_model::GeoBounds;
/// use ksi_transform::bounds::bound_pair;
///
/// let box_ = GeoBounds::TORONTO;
/// assert_eq!(bound_pair(Some(-79.4), Some(43.7), &box_), (Some(-79.4), Some(43.7)));
/// assert_eq!(bound_pair(Some(-79.4), Some(45.0), &box_), (None, None));
/// ```
pub fn bound_pair(
    lon: Option<f64>,
    lat: Option<f64>,
    bounds: &GeoBounds,
) -> (Option<f64>, Option<f64>) {
    match (lon, lat) {
        (Some(x), Some(y)) if bounds.contains(x, y) => (Some(x), Some(y)),
        _ => (None, None),
    }
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let height = df.height();
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; height]);
    };
    let casted = column.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Null `lon`/`lat` as a pair wherever the pair is incomplete or outside
/// `bounds`. Returns how many rows had at least one coordinate removed.
pub fn apply_bounds(df: &mut DataFrame, bounds: &GeoBounds) -> Result<usize> {
    let lons = float_values(df, LON)?;
    let lats = float_values(df, LAT)?;

    let mut nulled = 0usize;
    let mut kept_lons: Vec<Option<f64>> = Vec::with_capacity(lons.len());
    let mut kept_lats: Vec<Option<f64>> = Vec::with_capacity(lats.len());
    for (lon, lat) in lons.into_iter().zip(lats) {
        let (kept_lon, kept_lat) = bound_pair(lon, lat, bounds);
        if kept_lon.is_none() && (lon.is_some() || lat.is_some()) {
            nulled += 1;
        }
        kept_lons.push(kept_lon);
        kept_lats.push(kept_lat);
    }

    df.with_column(Series::new(LON.into(), kept_lons))?;
    df.with_column(Series::new(LAT.into(), kept_lats))?;

    debug!(nulled, "applied coordinate bounds");
    Ok(nulled)
}
