use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the cleaning stages.
///
/// Per-row parse problems never surface here; they degrade to nulls and are
/// counted in [`ksi_model::CleaningStats`]. Only frame-level failures do.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
