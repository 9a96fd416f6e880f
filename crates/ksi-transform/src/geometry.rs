//! Geometry centroid extraction.
//!
//! The `geometry` cell holds a GeoJSON-like object serialized as text, e.g.
//! `{"type":"Polygon","coordinates":[[[-79.38,43.65],[-79.40,43.66]]]}`.
//! The centroid is the per-axis mean of the outer ring's vertices.

use polars::prelude::*;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, trace};

use ksi_common::{column_text_values, parse_f64};
use ksi_model::GeometryCounts;
use ksi_model::columns::{GEOMETRY, LAT, LON};

use crate::error::Result;

/// A derived point, longitude first as in GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}

/// Why a geometry cell could not produce a centroid.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("malformed geometry json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("geometry is not a JSON object")]
    NotAnObject,

    #[error("outer ring is not a list of coordinate pairs")]
    RingShape,

    #[error("outer ring has no numeric {axis} values")]
    NoNumericValues { axis: &'static str },
}

/// Result of extracting a centroid from one cell.
#[derive(Debug)]
pub enum GeometryOutcome {
    Centroid(Centroid),
    /// The cell is null.
    Missing,
    /// The object parsed but has no usable `coordinates`.
    Absent,
    Invalid(GeometryError),
}

impl GeometryOutcome {
    pub fn centroid(&self) -> Option<Centroid> {
        match self {
            GeometryOutcome::Centroid(centroid) => Some(*centroid),
            _ => None,
        }
    }
}

/// Extract the centroid of a geometry cell.
///
/// # Examples
///
/// ```
/// use ksi_transform::geometry::{GeometryOutcome, extract_centroid};
///
/// let text =
///     r#"{"type":"Polygon","coordinates":[[[-79.38,43.65],[-79.40,43.66],[-79.39,43.64]]]}"#;
/// let centroid = extract_centroid(Some(text)).centroid().unwrap();
/// assert!((centroid.lon - -79.39).abs() < 1e-9);
/// assert!((centroid.lat - 43.65).abs() < 1e-9);
///
/// assert!(matches!(extract_centroid(None), GeometryOutcome::Missing));
/// assert!(matches!(extract_centroid(Some(r#"{"coordinates":[]}"#)), GeometryOutcome::Absent));
/// ```
pub fn extract_centroid(cell: Option<&str>) -> GeometryOutcome {
    let Some(text) = cell else {
        return GeometryOutcome::Missing;
    };
    match parse_centroid(text) {
        Ok(Some(centroid)) => GeometryOutcome::Centroid(centroid),
        Ok(None) => GeometryOutcome::Absent,
        Err(error) => GeometryOutcome::Invalid(error),
    }
}

fn parse_centroid(text: &str) -> std::result::Result<Option<Centroid>, GeometryError> {
    let geometry: Value = serde_json::from_str(text)?;
    let object = geometry.as_object().ok_or(GeometryError::NotAnObject)?;
    let coordinates = match object.get("coordinates") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) if items.is_empty() => return Ok(None),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(GeometryError::RingShape),
    };
    let ring = coordinates[0].as_array().ok_or(GeometryError::RingShape)?;

    let mut lon_sum = 0.0;
    let mut lon_count = 0usize;
    let mut lat_sum = 0.0;
    let mut lat_count = 0usize;
    for vertex in ring {
        let pair = vertex.as_array().ok_or(GeometryError::RingShape)?;
        if pair.len() < 2 {
            return Err(GeometryError::RingShape);
        }
        if let Some(lon) = numeric(&pair[0]) {
            lon_sum += lon;
            lon_count += 1;
        }
        if let Some(lat) = numeric(&pair[1]) {
            lat_sum += lat;
            lat_count += 1;
        }
    }
    if lon_count == 0 {
        return Err(GeometryError::NoNumericValues { axis: "longitude" });
    }
    if lat_count == 0 {
        return Err(GeometryError::NoNumericValues { axis: "latitude" });
    }
    Ok(Some(Centroid {
        lon: lon_sum / lon_count as f64,
        lat: lat_sum / lat_count as f64,
    }))
}

/// A vertex component as a finite number. Numeric strings count; null,
/// booleans, nested arrays and NaN do not.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Append `lon` and `lat` columns derived from `geometry`.
///
/// Without a `geometry` column both are all-null and every row counts as
/// missing.
pub fn attach_centroid_columns(df: &mut DataFrame) -> Result<GeometryCounts> {
    let height = df.height();
    let mut counts = GeometryCounts::default();
    let mut lons: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut lats: Vec<Option<f64>> = Vec::with_capacity(height);

    match column_text_values(df, GEOMETRY) {
        Some(cells) => {
            for (idx, cell) in cells.iter().enumerate() {
                let outcome = extract_centroid(cell.as_deref());
                match &outcome {
                    GeometryOutcome::Centroid(_) => counts.centroids += 1,
                    GeometryOutcome::Missing => counts.missing += 1,
                    GeometryOutcome::Absent => counts.absent += 1,
                    GeometryOutcome::Invalid(error) => {
                        counts.invalid += 1;
                        trace!(row = idx, %error, "invalid geometry");
                    }
                }
                let centroid = outcome.centroid();
                lons.push(centroid.map(|c| c.lon));
                lats.push(centroid.map(|c| c.lat));
            }
        }
        None => {
            debug!(column = GEOMETRY, "column missing or not text, coordinates will be null");
            counts.missing = height;
            lons.resize(height, None);
            lats.resize(height, None);
        }
    }

    df.with_column(Series::new(LON.into(), lons))?;
    df.with_column(Series::new(LAT.into(), lats))?;

    debug!(
        rows = height,
        centroids = counts.centroids,
        missing = counts.missing,
        absent = counts.absent,
        invalid = counts.invalid,
        "attached centroid columns"
    );
    Ok(counts)
}
