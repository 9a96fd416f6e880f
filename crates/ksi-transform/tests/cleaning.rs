//! End-to-end tests for the cleaning stages on in-memory tables.

use ksi_model::columns::{DATETIME, HOUR, LAT, LON, MINUTE, ROWS, TIME_STR};
use ksi_model::{CleanerOptions, GeoBounds};
use ksi_transform::bounds::{apply_bounds, bound_pair};
use ksi_transform::{
    aggregate_collisions, clean_records, collision_key, extract_centroid, total_rows,
};
use polars::prelude::*;
use proptest::prelude::*;

const TRIANGLE: &str =
    r#"{"type":"Polygon","coordinates":[[[-79.38,43.65],[-79.40,43.66],[-79.39,43.64]]]}"#;

fn raw_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::new("accnum".into(), vec![Some("1001"), Some("1001"), Some("1002"), None]),
        Column::new(
            "date".into(),
            vec![
                Some("2006-03-11T05:00:00.000Z"),
                Some("2006-03-11T05:00:00.000Z"),
                Some("2007/07/01 05:00:00+00"),
                Some("bad"),
            ],
        ),
        Column::new("time".into(), vec![Some("930"), Some("930"), Some("NaN"), Some("5")]),
        Column::new(
            "street1".into(),
            vec![Some(" YONGE ST"), Some("YONGE ST "), Some("KING ST"), None],
        ),
        Column::new(
            "geometry".into(),
            vec![
                Some(TRIANGLE),
                Some(TRIANGLE),
                Some(r#"{"coordinates":[[[-79.4,45.0]]]}"#),
                Some(r#"{"coordinates":[]}"#),
            ],
        ),
    ])
    .unwrap()
}

#[test]
fn test_time_930_derives_hour_and_minute() {
    let cleaned = clean_records(raw_frame(), 0, &CleanerOptions::default()).unwrap();
    let data = &cleaned.data;

    assert_eq!(data.column(TIME_STR).unwrap().str().unwrap().get(0), Some("0930"));
    assert_eq!(data.column(HOUR).unwrap().i32().unwrap().get(0), Some(9));
    assert_eq!(data.column(MINUTE).unwrap().i32().unwrap().get(0), Some(30));
}

#[test]
fn test_nan_time_falls_back_to_midnight() {
    let cleaned = clean_records(raw_frame(), 0, &CleanerOptions::default()).unwrap();
    let data = &cleaned.data;

    assert_eq!(data.column(TIME_STR).unwrap().null_count(), 1);
    assert_eq!(data.column(HOUR).unwrap().i32().unwrap().get(2), None);
    assert_eq!(data.column(MINUTE).unwrap().i32().unwrap().get(2), None);

    let datetime = data.column(DATETIME).unwrap().cast(&DataType::Int64).unwrap();
    let millis = datetime.i64().unwrap();
    let expected = chrono::NaiveDate::from_ymd_opt(2007, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis();
    assert_eq!(millis.get(2), Some(expected));
    // unparsed date gives a null datetime even with a valid time
    assert_eq!(millis.get(3), None);
}

#[test]
fn test_centroid_and_bounds() {
    let cleaned = clean_records(raw_frame(), 0, &CleanerOptions::default()).unwrap();
    let data = &cleaned.data;
    let lon = data.column(LON).unwrap().f64().unwrap();
    let lat = data.column(LAT).unwrap().f64().unwrap();

    assert!((lon.get(0).unwrap() + 79.39).abs() < 1e-9);
    assert!((lat.get(0).unwrap() - 43.65).abs() < 1e-9);
    // lat = 45.0 is outside the box, so both go
    assert_eq!(lon.get(2), None);
    assert_eq!(lat.get(2), None);
    // empty coordinates
    assert_eq!(lon.get(3), None);

    assert_eq!(cleaned.stats.out_of_bounds, 1);
    assert_eq!(cleaned.stats.geometry.centroids, 3);
    assert_eq!(cleaned.stats.geometry.absent, 1);
}

#[test]
fn test_trimmed_rows_collapse_into_one_collision() {
    let options = CleanerOptions::default();
    let cleaned = clean_records(raw_frame(), 0, &options).unwrap();

    let table = aggregate_collisions(&cleaned.data, &options.collision_keys).unwrap();
    let grouped = &table.data;

    // rows 0 and 1 differ only by whitespace in street1
    assert_eq!(grouped.height(), 3);
    let rows = grouped.column(ROWS).unwrap().u64().unwrap();
    assert_eq!(rows.get(0), Some(2));
    assert_eq!(total_rows(grouped).unwrap(), cleaned.data.height() as u64);
    assert_eq!(table.key, collision_key(&cleaned.data, &options.collision_keys));
}

#[test]
fn test_key_skips_absent_columns() {
    let options = CleanerOptions::default();
    let cleaned = clean_records(raw_frame(), 0, &options).unwrap();

    let key = collision_key(&cleaned.data, &options.collision_keys);

    insta::assert_snapshot!(key.join(","), @"accnum,date,time,street1,lat,lon");
}

#[test]
fn test_missing_date_and_time_columns() {
    let df = DataFrame::new(vec![Column::new("accnum".into(), vec!["1", "2"])]).unwrap();

    let cleaned = clean_records(df, 0, &CleanerOptions::default()).unwrap();

    assert_eq!(cleaned.data.column(DATETIME).unwrap().null_count(), 2);
    assert_eq!(cleaned.data.column(HOUR).unwrap().null_count(), 2);
    assert_eq!(cleaned.stats.datetime.unparsed_dates, 2);
    assert_eq!(cleaned.stats.geometry.missing, 2);
}

fn coordinate() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (-100.0f64..100.0).prop_map(Some)]
}

proptest! {
    #[test]
    fn bounds_keep_pairs_together(lon in coordinate(), lat in coordinate()) {
        let bounds = GeoBounds::TORONTO;
        let (kept_lon, kept_lat) = bound_pair(lon, lat, &bounds);

        prop_assert_eq!(kept_lon.is_some(), kept_lat.is_some());
        if let (Some(x), Some(y)) = (kept_lon, kept_lat) {
            prop_assert!(bounds.contains(x, y));
            prop_assert_eq!((Some(x), Some(y)), (lon, lat));
        }
    }

    #[test]
    fn bounds_are_idempotent(
        pairs in prop::collection::vec((coordinate(), coordinate()), 0..20)
    ) {
        let (lons, lats): (Vec<Option<f64>>, Vec<Option<f64>>) = pairs.into_iter().unzip();
        let mut df = DataFrame::new(vec![
            Column::new(LON.into(), lons),
            Column::new(LAT.into(), lats),
        ])
        .unwrap();

        apply_bounds(&mut df, &GeoBounds::TORONTO).unwrap();
        let once = df.clone();
        let nulled = apply_bounds(&mut df, &GeoBounds::TORONTO).unwrap();

        prop_assert_eq!(nulled, 0);
        prop_assert!(df.equals_missing(&once));
    }

    #[test]
    fn centroid_extraction_is_idempotent(
        ring in prop::collection::vec((-80.0f64..-78.0, 43.0f64..44.0), 1..8)
    ) {
        let vertices: Vec<String> = ring.iter().map(|(x, y)| format!("[{x},{y}]")).collect();
        let text = format!(r#"{{"type":"Polygon","coordinates":[[{}]]}}"#, vertices.join(","));

        let first = extract_centroid(Some(&text)).centroid();
        let second = extract_centroid(Some(&text)).centroid();

        prop_assert!(first.is_some());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rows_sum_to_record_count(
        ids in prop::collection::vec(prop::option::of(0u8..5), 0..40)
    ) {
        let ids: Vec<Option<String>> = ids
            .into_iter()
            .map(|id| id.map(|v| v.to_string()))
            .collect();
        let height = ids.len() as u64;
        let df = DataFrame::new(vec![Column::new("accnum".into(), ids)]).unwrap();

        let keys = CleanerOptions::default().collision_keys;
        let table = aggregate_collisions(&df, &keys).unwrap();

        prop_assert_eq!(total_rows(&table.data).unwrap(), height);
    }
}
