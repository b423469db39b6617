//! Error types for pipeline operations.
//!
//! Fatal conditions are represented as [`Error`] values; recoverable
//! conditions never reach this type and are handled as warnings at the
//! stage that observed them.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal pipeline errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form error, usually raised through [`crate::bail!`].
    #[error("{0}")]
    Generic(String),

    /// IO errors without further context.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO errors annotated with the attempted action and path.
    #[error("{action} ({path}): {source}")]
    Fs {
        /// What the pipeline was doing.
        action: String,
        /// File or directory the action targeted.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An external tool could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to spawn.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// No usable native toolchain installation was found.
    #[error("native toolchain not found: {detail}")]
    SdkNotFound {
        /// Which installations were looked for and how to point at one.
        detail: String,
    },

    /// Every compiler backend permitted by the configuration failed.
    #[error("native compilation failed for {arch} (compiler preference: {preference})")]
    CompileFailed {
        /// Target architecture of the failed build.
        arch: &'static str,
        /// Backend selection that was in effect.
        preference: &'static str,
    },

    /// An error wrapped with a higher-level description.
    #[error("{message}: {source}")]
    Context {
        /// Description of the failing operation.
        message: String,
        /// Wrapped error.
        #[source]
        source: Box<Error>,
    },
}

/// Extension trait for attaching a message to errors and empty options.
pub trait Context<T> {
    /// Wraps the error (or replaces the missing value) with `message`.
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Error::Generic(message.into()))
    }
}

impl<T, E: Into<Error>> Context<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Context {
            message: message.into(),
            source: Box::new(e.into()),
        })
    }
}

/// Extension trait for IO results that touch a known path.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] with action and path.
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with an [`Error::Generic`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::pipeline::error::Error::Generic(format!($($arg)*)))
    };
}
