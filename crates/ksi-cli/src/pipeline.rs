//! Collision cleaning pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Setup**: Create the output directory
//! 2. **Ingest**: Read the raw CSV as text and normalize column names
//! 3. **Clean**: Derive date/time, centroid and bounds; trim text
//! 4. **Write records**: Person-level CSV
//! 5. **Aggregate**: Group into one row per collision
//! 6. **Write collisions**: Collision-level CSV
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use ksi_ingest::{RawTable, read_raw_table};
use ksi_model::{CleanerOptions, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, OutputPaths};
use ksi_output::{prepare_output_dir, write_collision_table, write_person_table};
use ksi_transform::{
    CleanedRecords, CollisionTable, aggregate_collisions, clean_records, total_rows,
};

use crate::types::RunResult;

/// One-shot batch cleaner: one raw file in, two CSV files out.
#[derive(Debug, Clone)]
pub struct CollisionCleaner {
    input: PathBuf,
    output_dir: PathBuf,
    options: CleanerOptions,
}

impl Default for CollisionCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR)
    }
}

impl CollisionCleaner {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            options: CleanerOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CleanerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths::in_dir(&self.output_dir)
    }

    /// Run every stage. Only I/O failures abort; bad cells become nulls.
    pub fn run(&self) -> Result<RunResult> {
        let run_span = info_span!("clean", input = %self.input.display());
        let _run_guard = run_span.enter();
        let outputs = self.output_paths();

        // =====================================================================
        // Stage 1: Setup
        // =====================================================================
        prepare_output_dir(&self.output_dir).with_context(|| {
            format!("prepare output directory {}", self.output_dir.display())
        })?;

        // =====================================================================
        // Stage 2: Ingest
        // =====================================================================
        let raw = info_span!("ingest").in_scope(|| ingest(&self.input))?;

        // =====================================================================
        // Stage 3: Clean
        // =====================================================================
        let CleanedRecords { mut data, stats } =
            info_span!("clean_records").in_scope(|| clean(raw, &self.options))?;
        let person_rows = data.height();

        // =====================================================================
        // Stage 4: Write records
        // =====================================================================
        info_span!("write_records", path = %outputs.person_level.display())
            .in_scope(|| write_records(&mut data, &outputs.person_level))?;

        // =====================================================================
        // Stage 5: Aggregate
        // =====================================================================
        let CollisionTable {
            key,
            data: mut collisions,
        } = info_span!("aggregate").in_scope(|| aggregate(&data, &self.options))?;

        // =====================================================================
        // Stage 6: Write collisions
        // =====================================================================
        info_span!("write_collisions", path = %outputs.collision_level.display())
            .in_scope(|| write_collisions(&mut collisions, &outputs.collision_level))?;

        Ok(RunResult {
            input: self.input.clone(),
            outputs,
            person_rows,
            collision_rows: collisions.height(),
            collision_key: key,
            stats,
        })
    }
}

/// Read the raw table with normalized column names.
pub fn ingest(input: &Path) -> Result<RawTable> {
    let start = Instant::now();
    let raw = read_raw_table(input).with_context(|| format!("read {}", input.display()))?;
    info!(
        rows = raw.data.height(),
        columns = raw.data.width(),
        renamed_duplicates = raw.renamed_duplicates,
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(raw)
}

/// Run the per-row cleaning stages.
pub fn clean(raw: RawTable, options: &CleanerOptions) -> Result<CleanedRecords> {
    let start = Instant::now();
    let cleaned =
        clean_records(raw.data, raw.renamed_duplicates, options).context("clean records")?;
    let stats = &cleaned.stats;
    info!(
        rows = cleaned.data.height(),
        unparsed_dates = stats.datetime.unparsed_dates,
        unparsed_times = stats.datetime.unparsed_times,
        centroids = stats.geometry.centroids,
        invalid_geometry = stats.geometry.invalid,
        out_of_bounds = stats.out_of_bounds,
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    Ok(cleaned)
}

pub fn write_records(data: &mut DataFrame, path: &Path) -> Result<()> {
    let start = Instant::now();
    write_person_table(data, path)
        .with_context(|| format!("write person-level table {}", path.display()))?;
    info!(
        rows = data.height(),
        duration_ms = start.elapsed().as_millis(),
        "person-level table written"
    );
    Ok(())
}

/// Group person rows into collisions and check the counts add up.
pub fn aggregate(data: &DataFrame, options: &CleanerOptions) -> Result<CollisionTable> {
    let start = Instant::now();
    let table =
        aggregate_collisions(data, &options.collision_keys).context("aggregate collisions")?;
    let total = total_rows(&table.data).context("sum collision rows")?;
    ensure!(
        total == data.height() as u64,
        "collision rows sum to {total}, expected {}",
        data.height()
    );
    info!(
        collisions = table.data.height(),
        key_columns = table.key.len(),
        rows = total,
        duration_ms = start.elapsed().as_millis(),
        "aggregate complete"
    );
    Ok(table)
}

pub fn write_collisions(collisions: &mut DataFrame, path: &Path) -> Result<()> {
    let start = Instant::now();
    write_collision_table(collisions, path)
        .with_context(|| format!("write collision-level table {}", path.display()))?;
    info!(
        rows = collisions.height(),
        duration_ms = start.elapsed().as_millis(),
        "collision-level table written"
    );
    Ok(())
}
