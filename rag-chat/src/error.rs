//! Typed error for the chat pipeline.

use ai_llm_service::AiLlmError;
use site_corpus::{CorpusError, RankError};
use thiserror::Error;

/// First failure of any pipeline stage. Nothing is recovered locally.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Snapshot missing or corrupt.
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(#[from] CorpusError),

    /// Request rejected before any external call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Embedding service failed (transport, auth, decode).
    #[error("embedding service error: {0}")]
    EmbeddingService(#[source] AiLlmError),

    /// Chat-completion service failed (transport, auth, decode).
    #[error("completion service error: {0}")]
    CompletionService(#[source] AiLlmError),

    /// Ranker misuse: bad `k` or an embedding of the wrong size.
    #[error("ranking error: {0}")]
    Rank(#[from] RankError),
}
