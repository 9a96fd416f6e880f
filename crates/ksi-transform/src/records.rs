//! Person-level stage chain.

use polars::prelude::DataFrame;
use tracing::debug;

use ksi_model::{CleanerOptions, CleaningStats};

use crate::bounds::apply_bounds;
use crate::datetime::derive_datetime_columns;
use crate::error::Result;
use crate::geometry::attach_centroid_columns;
use crate::text::trim_text_columns;

/// The cleaned person-level table and what was observed building it.
#[derive(Debug, Clone)]
pub struct CleanedRecords {
    pub data: DataFrame,
    pub stats: CleaningStats,
}

/// Run the per-row stages over a normalized, all-text table.
///
/// Order matters: bounds runs on the centroid columns from the geometry
/// stage, and text trimming runs last so it only sees columns still typed
/// as `String`.
pub fn clean_records(
    mut df: DataFrame,
    renamed_duplicates: usize,
    options: &CleanerOptions,
) -> Result<CleanedRecords> {
    let mut stats = CleaningStats {
        input_rows: df.height(),
        input_columns: df.width(),
        renamed_duplicates,
        ..CleaningStats::default()
    };

    stats.datetime = derive_datetime_columns(&mut df)?;
    stats.geometry = attach_centroid_columns(&mut df)?;
    stats.out_of_bounds = apply_bounds(&mut df, &options.bounds)?;
    stats.trimmed_columns = trim_text_columns(&mut df)?;

    debug!(rows = df.height(), columns = df.width(), "cleaned person-level records");
    Ok(CleanedRecords { data: df, stats })
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use ksi_model::columns::{DATE, DATETIME, LAT, LON, TIME_STR};

    #[test]
    fn test_stage_chain_types_columns() {
        let df = DataFrame::new(vec![
            Column::new("accnum".into(), vec![Some(" 100 "), Some("101")]),
            Column::new("date".into(), vec![Some("2006-03-11"), None]),
            Column::new("time".into(), vec![Some("930"), Some("x")]),
            Column::new(
                "geometry".into(),
                vec![Some(r#"{"coordinates":[[[-79.4,43.7]]]}"#), Some("{")],
            ),
        ])
        .unwrap();

        let cleaned = clean_records(df, 0, &CleanerOptions::default()).unwrap();

        let data = &cleaned.data;
        assert_eq!(data.height(), 2);
        assert_eq!(data.column(DATE).unwrap().dtype(), &DataType::Date);
        assert!(matches!(
            data.column(DATETIME).unwrap().dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, None)
        ));
        assert_eq!(data.column(LON).unwrap().dtype(), &DataType::Float64);
        assert_eq!(data.column(LAT).unwrap().f64().unwrap().get(0), Some(43.7));
        assert_eq!(data.column(TIME_STR).unwrap().str().unwrap().get(0), Some("0930"));
        assert_eq!(data.column("accnum").unwrap().str().unwrap().get(0), Some("100"));

        let stats = &cleaned.stats;
        assert_eq!(stats.input_rows, 2);
        assert_eq!(stats.input_columns, 4);
        assert_eq!(stats.datetime.unparsed_dates, 1);
        assert_eq!(stats.datetime.unparsed_times, 1);
        assert_eq!(stats.geometry.centroids, 1);
        assert_eq!(stats.geometry.invalid, 1);
        assert_eq!(stats.out_of_bounds, 0);
    }
}
