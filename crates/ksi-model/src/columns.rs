//! Column names shared by the cleaner stages and the writers.
//!
//! Raw headers are normalized to lower snake case before any stage runs,
//! so every name here is already in its normalized form.

/// Free-form collision date.
pub const DATE: &str = "date";
/// Raw HHMM time, numeric-like text.
pub const TIME: &str = "time";
/// Embedded GeoJSON-like polygon text.
pub const GEOMETRY: &str = "geometry";

/// Zero-padded four character HHMM string derived from [`TIME`].
pub const TIME_STR: &str = "time_str";
pub const HOUR: &str = "hour";
pub const MINUTE: &str = "minute";
/// Date combined with the HH:MM portion of [`TIME_STR`].
pub const DATETIME: &str = "datetime";
pub const LON: &str = "lon";
pub const LAT: &str = "lat";

/// Count column of the collision-level table.
pub const ROWS: &str = "rows";

/// Collision identifier.
pub const ACCNUM: &str = "accnum";

/// Declared key of the collision-level table, in output order.
///
/// Only the subset present in the cleaned table is used for grouping.
pub const COLLISION_KEY_COLUMNS: [&str; 11] = [
    ACCNUM,
    DATE,
    TIME,
    "street1",
    "street2",
    "district",
    "division",
    "hood_158",
    "neighbourhood_158",
    LAT,
    LON,
];

/// Columns the cleaner adds to every person-level row.
pub const DERIVED_COLUMNS: [&str; 6] = [TIME_STR, HOUR, MINUTE, DATETIME, LON, LAT];

/// How the cleaner uses a named column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRole {
    pub name: &'static str,
    /// Part of [`COLLISION_KEY_COLUMNS`].
    pub key: bool,
    /// Added by the cleaner; see [`DERIVED_COLUMNS`].
    pub derived: bool,
}

/// Every key and derived column, key columns first in declared order.
pub fn column_roles() -> Vec<ColumnRole> {
    let mut roles: Vec<ColumnRole> = COLLISION_KEY_COLUMNS
        .iter()
        .copied()
        .map(|name| ColumnRole {
            name,
            key: true,
            derived: DERIVED_COLUMNS.contains(&name),
        })
        .collect();
    roles.extend(
        DERIVED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !COLLISION_KEY_COLUMNS.contains(name))
            .map(|name| ColumnRole {
                name,
                key: false,
                derived: true,
            }),
    );
    roles
}
