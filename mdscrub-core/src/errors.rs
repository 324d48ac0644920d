//! errors.rs - Custom error types for the mdscrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! Two classes of failure exist: rule-set problems, which are fatal to a whole
//! run, and document-local problems (parse or I/O), which a batch runner records
//! against a single file before moving on. [`MdscrubError::is_file_local`] tells
//! them apart.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `mdscrub-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MdscrubError {
    /// The rules source is missing, malformed, or failed validation.
    #[error("Invalid rules configuration: {0}")]
    Config(String),

    #[error("Failed to compile pattern '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    /// A document opened a frontmatter block whose contents could not be parsed.
    #[error("Failed to parse frontmatter in '{source_id}': {message}")]
    Parse { source_id: String, message: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize frontmatter: {0}")]
    Serialization(String),
}

impl MdscrubError {
    /// Helper for building an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MdscrubError::Io { path: path.into(), source }
    }

    /// Returns true if the error only concerns a single document and a batch
    /// may continue with the next file.
    pub fn is_file_local(&self) -> bool {
        matches!(
            self,
            MdscrubError::Parse { .. } | MdscrubError::Io { .. } | MdscrubError::Serialization(_)
        )
    }
}
