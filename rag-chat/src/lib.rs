//! Retrieval-augmented sales chat with a single public pipeline function.
//!
//! Public API: [`chat_completion`]. It splits the conversation into query and
//! history, embeds the query, ranks the site corpus, builds the Q/A prompt,
//! calls the completion model and returns the reply with the pages it used.

mod api_types;
mod cfg;
mod conversation;
mod error;
mod prompt;
mod provider;
mod response;

pub use api_types::{ChatRequest, ChatResponse, Message, Reference};
pub use cfg::ChatConfig;
pub use conversation::{
    CUSTOMER_SOURCE, ConversationTurn, Role, RoleMapping, split_conversation,
};
pub use error::ChatError;
pub use prompt::{DEFAULT_SYSTEM, DEFAULT_WORD_LIMIT, assemble, truncate_words};
pub use provider::{CompletionProvider, EmbeddingsProvider, ProviderFuture};
pub use response::format_response;

use site_corpus::{SharedCorpus, rank};
use tracing::{debug, info};

/// Answers the last message of `request` using retrieved site context.
///
/// Stages run strictly in order and the first failure is returned as is:
/// validate → load corpus → embed → rank → assemble → complete → format.
/// Validation happens before any service call, so an invalid request never
/// reaches the embedding or completion providers.
///
/// # Errors
/// - [`ChatError::InvalidRequest`] for an empty message list or blank query
/// - [`ChatError::CorpusUnavailable`] if the snapshot cannot be loaded
/// - [`ChatError::EmbeddingService`] / [`ChatError::CompletionService`] on provider failures
/// - [`ChatError::Rank`] if `cfg.top_k == 0` or the embedding size does not match the corpus
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use ai_llm_service::LlmServiceProfiles;
/// # use rag_chat::{ChatConfig, ChatRequest, Message, chat_completion};
/// # use site_corpus::SharedCorpus;
/// # #[tokio::main] async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let llm = Arc::new(LlmServiceProfiles::from_env()?);
/// let corpus = SharedCorpus::new("data/site_data.jsonl");
/// let request = ChatRequest {
///     messages: vec![Message::new("Does the brewer make tea?", "customer")],
/// };
/// let reply = chat_completion(&request, &corpus, &*llm, &*llm, &ChatConfig::default()).await?;
/// println!("{} ({} refs)", reply.content, reply.references.len());
/// # Ok(()) }
/// ```
pub async fn chat_completion(
    request: &ChatRequest,
    corpus: &SharedCorpus,
    embedder: &dyn EmbeddingsProvider,
    completer: &dyn CompletionProvider,
    cfg: &ChatConfig,
) -> Result<ChatResponse, ChatError> {
    // 1) Validate and split
    let (query, history) =
        split_conversation(&request.messages, cfg.history_limit, cfg.role_mapping)?;
    debug!(
        query_len = query.len(),
        history = history.len(),
        "chat request accepted"
    );

    // 2) Embed + retrieve
    let store = corpus.get().await?;
    let query_vector = embedder
        .embed(&query)
        .await
        .map_err(ChatError::EmbeddingService)?;
    let ranked = rank(&query_vector, &store, cfg.top_k, cfg.similarity)?;
    debug!(
        hits = ranked.len(),
        top_score = ranked.first().map(|r| r.score),
        "corpus ranked"
    );

    // 3) Build prompt
    let user_prompt = assemble(&query, &ranked, &history, cfg.word_limit);

    // 4) Complete
    let content = completer
        .complete(&cfg.system_prompt, &user_prompt)
        .await
        .map_err(ChatError::CompletionService)?;

    // 5) Respond
    info!(
        references = ranked.len(),
        reply_len = content.len(),
        "chat completion done"
    );
    Ok(format_response(content, &ranked))
}
