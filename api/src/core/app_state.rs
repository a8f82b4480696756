use std::sync::Arc;

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use rag_chat::{ChatConfig, CompletionProvider, EmbeddingsProvider};
use site_corpus::SharedCorpus;
use tracing::info;

/// Default location of the embedded site snapshot.
pub const DEFAULT_CORPUS_PATH: &str = "data/site_data.jsonl";

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lazily loaded site corpus, shared by every request.
    pub corpus: Arc<SharedCorpus>,
    /// Embedding backend for the query.
    pub embedder: Arc<dyn EmbeddingsProvider>,
    /// Chat completion backend.
    pub completer: Arc<dyn CompletionProvider>,
    /// Retrieval and prompt settings.
    pub chat: ChatConfig,
}

impl AppState {
    pub fn new(
        corpus: SharedCorpus,
        embedder: Arc<dyn EmbeddingsProvider>,
        completer: Arc<dyn CompletionProvider>,
        chat: ChatConfig,
    ) -> Self {
        Self {
            corpus: Arc::new(corpus),
            embedder,
            completer,
            chat,
        }
    }

    /// Load shared state from environment variables.
    ///
    /// Both providers are backed by one [`LlmServiceProfiles`]; no HTTP client
    /// is built and the corpus is not read until the first chat request.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let corpus_path =
            std::env::var("CORPUS_PATH").unwrap_or_else(|_| DEFAULT_CORPUS_PATH.into());
        let llm = Arc::new(LlmServiceProfiles::from_env()?);
        let chat = ChatConfig::from_env();

        info!(
            corpus = %corpus_path,
            top_k = chat.top_k,
            similarity = ?chat.similarity,
            roles = ?chat.role_mapping,
            "app state configured"
        );

        Ok(Self::new(
            SharedCorpus::new(corpus_path),
            llm.clone(),
            llm,
            chat,
        ))
    }
}
