//! Error types surfaced at the CLI boundary.

use thiserror::Error;

/// Result type alias for top-level operations.
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Errors that terminate the tool with a nonzero exit code.
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// IO errors outside the pipeline, such as resolving the project root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fatal pipeline errors.
    #[error(transparent)]
    Pipeline(#[from] crate::pipeline::Error),
}
