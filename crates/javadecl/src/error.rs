//! Error types for javadecl generation.
//!
//! All fallible operations return [`Result<T>`] with the offending path attached
//! where one exists.

use javadecl_api::{ConfigError, ParserError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Error type for a generator run.
///
/// Malformed Java never shows up here; only configuration and filesystem
/// problems do.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Reading or writing a file or directory failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The parser could not be set up or run
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Walking a directory tree failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl GeneratorError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
