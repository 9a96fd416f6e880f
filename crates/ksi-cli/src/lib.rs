//! CLI library components for the KSI collision cleaner.

pub mod logging;
pub mod pipeline;
pub mod types;

pub use pipeline::CollisionCleaner;
pub use types::RunResult;
