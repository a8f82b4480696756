//! Unified error types for the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Snapshot could not be turned into a usable corpus.
///
/// Every variant means the corpus is unavailable; callers usually do not need
/// to distinguish them beyond logging.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Snapshot file missing or unreadable.
    #[error("corpus snapshot {path:?} unreadable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row failed to parse.
    #[error("corpus snapshot line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A row's embedding length differs from the first row's.
    #[error("corpus snapshot line {line}: embedding has {got} dimensions, want {want}")]
    DimensionMismatch { line: usize, got: usize, want: usize },

    /// Snapshot contained no rows, or rows with empty embeddings.
    #[error("corpus snapshot is empty: {0}")]
    Empty(String),

    /// Background load task panicked or was cancelled.
    #[error("corpus load task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Misuse of the ranker.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// `k` must be at least 1.
    #[error("k must be positive, got {0}")]
    InvalidK(usize),

    /// Query vector length differs from the corpus dimension.
    #[error("query vector has {got} dimensions, corpus has {want}")]
    DimensionMismatch { got: usize, want: usize },
}
