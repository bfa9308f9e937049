//! Error handling for the benchmark orchestrator.

use std::path::PathBuf;

use thiserror::Error;
use zxbench_gen::GenError;

use crate::config::ConfigError;

/// Result type for orchestrator operations.
pub type SchedResult<T> = Result<T, SchedError>;

/// Errors that can occur while preparing or running benchmark tasks.
///
/// Solver timeouts and solver failures are not errors; they are recorded as
/// [`SolverOutcome`](crate::SolverOutcome)s.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchedError {
    /// Circuit generation or gadget building failed.
    #[error("Circuit generation failed: {0}")]
    Generation(#[from] GenError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A file could not be written.
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking worker panicked or was cancelled.
    #[error("Worker task failed: {0}")]
    Worker(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
