use std::fs;
use std::path::PathBuf;

use polars::prelude::DataType;
use tempfile::TempDir;

use ksi_ingest::{IngestError, read_raw_table};

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn reads_every_column_as_text_with_normalized_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "ksi.csv",
        "ACCNUM,DATE,TIME,Street 1,geometry\n\
         1001,2006/03/11 05:00:00+00,930,  YONGE ST ,\"{\"\"coordinates\"\":[]}\"\n\
         1002,2006/03/12 05:00:00+00,,BLOOR ST W,\n",
    );

    let raw = read_raw_table(&path).expect("read raw table");
    let df = &raw.data;

    assert_eq!(raw.renamed_duplicates, 0);
    assert_eq!(df.height(), 2);
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["accnum", "date", "time", "street_1", "geometry"]);
    for column in df.get_columns() {
        assert_eq!(column.dtype(), &DataType::String, "{}", column.name());
    }

    let accnum = df.column("accnum").unwrap().str().unwrap();
    assert_eq!(accnum.get(0), Some("1001"));

    let time = df.column("time").unwrap().str().unwrap();
    assert_eq!(time.get(0), Some("930"));
    assert_eq!(time.get(1), None);

    let geometry = df.column("geometry").unwrap().str().unwrap();
    assert_eq!(geometry.get(0), Some("{\"coordinates\":[]}"));
}

#[test]
fn duplicate_headers_are_suffixed() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "dupes.csv", "Time,TIME\n930,1745\n");

    let raw = read_raw_table(&path).expect("read raw table");

    assert_eq!(raw.renamed_duplicates, 1);
    let names: Vec<String> = raw
        .data
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["time", "time_2"]);
}

#[test]
fn missing_file_is_reported_with_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.csv");

    let err = read_raw_table(&path).unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn quoted_and_bare_empty_cells_are_both_null() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "empty.csv", "ACCNUM,STREET2\n1001,\n1001,\"\"\n1002,\" \"\n");

    let raw = read_raw_table(&path).expect("read raw table");

    let street2 = raw.data.column("street2").unwrap().str().unwrap();
    assert_eq!(street2.get(0), None);
    assert_eq!(street2.get(1), None);
    assert_eq!(street2.get(2), Some(" "));
}

#[test]
fn exact_duplicate_headers_are_suffixed() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "exact.csv", "ACCNUM,TIME,TIME\n1001,930,1745\n");

    let raw = read_raw_table(&path).expect("read raw table");

    assert_eq!(raw.renamed_duplicates, 1);
    let names: Vec<String> = raw
        .data
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["accnum", "time", "time_2"]);
    let second = raw.data.column("time_2").unwrap().str().unwrap();
    assert_eq!(second.get(0), Some("1745"));
}
