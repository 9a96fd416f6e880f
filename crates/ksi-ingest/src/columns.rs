//! Column-name normalization.
//!
//! Raw KSI exports vary header casing and spacing between releases
//! (`ACCNUM`, `Accnum`, ` Neighbourhood 158`). Every stage after ingestion
//! addresses columns by their normalized lower snake case name.

use std::collections::HashSet;

use polars::prelude::DataFrame;
use tracing::warn;

use crate::error::Result;

/// Normalize one raw header: trim, lower-case, spaces to underscores.
///
/// # Examples
///
/// ```
/// use ksi_ingest::normalize_column_name;
///
/// assert_eq!(normalize_column_name("  Neighbourhood 158 "), "neighbourhood_158");
/// assert_eq!(normalize_column_name("ACCNUM"), "accnum");
/// ```
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Normalize a list of raw headers, keeping the result unique.
///
/// A name that collides with an earlier one gets `_2`, `_3`, ... appended.
/// Returns the names and how many had to be suffixed.
pub fn normalize_column_names<I, S>(raw: I) -> (Vec<String>, usize)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    let mut suffixed = 0usize;
    for header in raw {
        let base = normalize_column_name(header.as_ref());
        let mut name = base.clone();
        let mut counter = 2usize;
        while seen.contains(&name) {
            name = format!("{base}_{counter}");
            counter += 1;
        }
        if name != base {
            warn!(
                raw = header.as_ref(),
                normalized = %base,
                renamed = %name,
                "duplicate column after normalization"
            );
            suffixed += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    (names, suffixed)
}

/// Marker Polars appends to an exact duplicate header on read.
const POLARS_DUPLICATE_MARKER: &str = "_duplicated_";

/// Undo the Polars rename of an exact duplicate header.
///
/// `TIME_duplicated_0` becomes `TIME` when `TIME` appears earlier, so the
/// duplicate goes through the usual suffixing.
fn strip_duplicate_marker<'a>(name: &'a str, earlier: &HashSet<&str>) -> &'a str {
    if let Some((base, index)) = name.rsplit_once(POLARS_DUPLICATE_MARKER)
        && !index.is_empty()
        && index.bytes().all(|b| b.is_ascii_digit())
        && earlier.contains(base)
    {
        return base;
    }
    name
}

/// Rename every column of `df` to its normalized form.
///
/// Exact duplicate headers, which Polars has already renamed, and headers
/// that only collide after normalization are both suffixed `_2`, `_3`, ...
/// Returns the number of duplicate names that were suffixed.
pub fn normalize_columns(df: &mut DataFrame) -> Result<usize> {
    let current: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut earlier: HashSet<&str> = HashSet::new();
    let mut raw: Vec<&str> = Vec::with_capacity(current.len());
    for name in &current {
        let original = strip_duplicate_marker(name, &earlier);
        earlier.insert(name.as_str());
        raw.push(original);
    }
    let (names, suffixed) = normalize_column_names(&raw);
    if names != current {
        df.set_column_names(names)?;
    }
    Ok(suffixed)
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, DataFrame};

    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("DATE"), "date");
        assert_eq!(normalize_column_name(" Street 1 "), "street_1");
        assert_eq!(normalize_column_name("\u{feff}ACCNUM"), "accnum");
        assert_eq!(normalize_column_name("a  b"), "a__b");
        assert_eq!(normalize_column_name(""), "");
    }

    #[test]
    fn test_duplicates_are_suffixed() {
        let (names, suffixed) = normalize_column_names(["Time", "TIME", " time "]);
        assert_eq!(names, vec!["time", "time_2", "time_3"]);
        assert_eq!(suffixed, 2);
    }

    #[test]
    fn test_empty_header_list() {
        let (names, suffixed) = normalize_column_names(Vec::<String>::new());
        assert!(names.is_empty());
        assert_eq!(suffixed, 0);
    }

    #[test]
    fn test_normalize_columns_renames_frame() {
        let mut df = DataFrame::new(vec![
            Column::new("ACCNUM".into(), vec!["1"]),
            Column::new("Hood 158".into(), vec!["77"]),
        ])
        .unwrap();

        let suffixed = normalize_columns(&mut df).unwrap();

        assert_eq!(suffixed, 0);
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["accnum", "hood_158"]);
    }

    #[test]
    fn test_polars_duplicate_rename_is_suffixed() {
        let mut df = DataFrame::new(vec![
            Column::new("TIME".into(), vec!["930"]),
            Column::new("TIME_duplicated_0".into(), vec!["1745"]),
            Column::new("note_duplicated_0".into(), vec!["x"]),
        ])
        .unwrap();

        let suffixed = normalize_columns(&mut df).unwrap();

        assert_eq!(suffixed, 1);
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["time", "time_2", "note_duplicated_0"]);
    }
}
