//! Per-stage counters collected while cleaning.
//!
//! None of these are failures: every counted row survives with null
//! derived fields. They exist so the run summary can show how much of the
//! input degraded.

use serde::{Deserialize, Serialize};

/// Counters from the date/time deriver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeCounts {
    /// Rows whose `date` cell was null or did not parse.
    pub unparsed_dates: usize,
    /// Rows whose `time` cell was null or not a 1-4 digit number.
    pub unparsed_times: usize,
    /// Rows with a parsed date and time string that is not a clock time (e.g. `2575`).
    pub invalid_clock_times: usize,
}

/// Outcome tally from the geometry centroid extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryCounts {
    pub centroids: usize,
    /// Null geometry cells, or no geometry column at all.
    pub missing: usize,
    /// Parsed objects without usable `coordinates`.
    pub absent: usize,
    /// Malformed JSON or an unexpected coordinate shape.
    pub invalid: usize,
}

impl GeometryCounts {
    pub fn total(&self) -> usize {
        self.centroids + self.missing + self.absent + self.invalid
    }
}

/// Everything the cleaner observed in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub input_rows: usize,
    pub input_columns: usize,
    /// Raw headers that collided after normalization and were suffixed.
    pub renamed_duplicates: usize,
    pub datetime: DateTimeCounts,
    pub geometry: GeometryCounts,
    /// Coordinate pairs nulled by the bounds filter.
    pub out_of_bounds: usize,
    /// String columns that went through the text normalizer.
    pub trimmed_columns: usize,
}
