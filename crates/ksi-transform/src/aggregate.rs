//! Collision-level aggregation.
//!
//! The person-level table has one row per involved party. Grouping on the
//! collision key collapses it to one row per collision with a `rows` count.

use std::collections::HashSet;

use polars::prelude::*;
use tracing::{debug, warn};

use ksi_model::columns::ROWS;

use crate::error::Result;

/// Intersect the declared key with the table schema, keeping declared order.
///
/// Declared columns missing from `df` are dropped without error.
pub fn collision_key(df: &DataFrame, declared: &[String]) -> Vec<String> {
    let present: HashSet<&str> = df
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();
    let key: Vec<String> = declared
        .iter()
        .filter(|name| present.contains(name.as_str()))
        .cloned()
        .collect();
    if key.len() < declared.len() {
        let dropped: Vec<&str> = declared
            .iter()
            .map(String::as_str)
            .filter(|name| !present.contains(name))
            .collect();
        debug!(?dropped, "key columns absent from input");
    }
    key
}

/// The collision-level table and the key it was grouped on.
#[derive(Debug, Clone)]
pub struct CollisionTable {
    /// Present subset of the declared key, in declared order.
    pub key: Vec<String>,
    pub data: DataFrame,
}

/// Group `df` by the present subset of `declared` and count rows per group.
///
/// The key is resolved once against the schema before grouping. Null key
/// values form their own group. Groups appear in order of first occurrence.
pub fn aggregate_collisions(df: &DataFrame, declared: &[String]) -> Result<CollisionTable> {
    let key = collision_key(df, declared);
    if key.is_empty() {
        warn!("no collision key columns present, collapsing to a single row");
        let total = df.height() as u64;
        let data = DataFrame::new(vec![Column::new(ROWS.into(), vec![total])])?;
        return Ok(CollisionTable { key, data });
    }

    let by: Vec<Expr> = key.iter().map(|name| col(name.as_str())).collect();
    let grouped = df
        .clone()
        .lazy()
        .group_by_stable(by)
        .agg([len().cast(DataType::UInt64).alias(ROWS)])
        .collect()?;

    debug!(
        key_columns = key.len(),
        groups = grouped.height(),
        "aggregated collisions"
    );
    Ok(CollisionTable { key, data: grouped })
}

/// Sum of the `rows` column.
pub fn total_rows(aggregate: &DataFrame) -> Result<u64> {
    let rows = aggregate.column(ROWS)?.cast(&DataType::UInt64)?;
    Ok(rows.u64()?.into_iter().flatten().sum())
}
