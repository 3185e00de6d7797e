use std::path::PathBuf;

use crate::extractor::ExtractError;

/// Errors that abort a project run.
///
/// Per-file read failures are not errors; the file is skipped with a warning.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// I/O error on the project root.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Directory walk failed.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A configured glob pattern is invalid.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    Glob {
        /// Pattern as written.
        pattern: String,
        /// Reason reported by the glob parser.
        reason: String,
    },

    /// `tsconfig.json` is not valid JSON.
    #[error("invalid {path}: {source}")]
    TsConfig {
        /// Path of the config file.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },

    /// The extractor could not run.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
