//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the session engine and corpus loading.
///
/// Gameplay itself has a single failure mode, [`CoreError::InsufficientCorpus`].
/// Invalid selections are silent no-ops, not errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The corpus cannot supply a full round
    #[error("Corpus has {available} entries but a round needs {requested}")]
    InsufficientCorpus { available: usize, requested: usize },

    /// A round must contain at least one pair
    #[error("Round subset size must be at least 1")]
    EmptySubset,

    /// Loaded corpus has no entries
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// An entry has a blank source or target
    #[error("Corpus entry {index} has a blank source or target")]
    BlankEntry { index: usize },

    /// Two entries share a source term (the pair key)
    #[error("Duplicate source term in corpus: {0}")]
    DuplicateSource(String),

    /// Corpus file could not be read
    #[error("Failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not a JSON array of entries
    #[error("Invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}
