//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Each profile lazily builds its HTTP client on first use; concurrent first
//!   calls are serialized so exactly one client is built per profile.
//! - If both profiles share endpoint, key and timeout, they still get separate
//!   clients: the cost is one connection pool per profile.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//! let emb = svc.embed("Which brewer fits a small kitchen?").await?;
//! println!("Embedding dim = {}", emb.len());
//!
//! let txt = svc.generate("Q: hi\nA: ", Some("You are terse.")).await?;
//! println!("{txt}");
//! # Ok(()) }
//! ```

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    config::{
        default_config::{config_openai_chat, config_openai_embedding},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::AiLlmError,
    services::open_ai_service::OpenAiService,
};

/// Shared service that manages the **chat** and **embedding** profiles.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat: LlmModelConfig,
    embedding: LlmModelConfig,

    chat_client: OnceCell<Arc<OpenAiService>>,
    embedding_client: OnceCell<Arc<OpenAiService>>,
}

impl LlmServiceProfiles {
    /// Creates a new service from explicit profiles. No client is built yet.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            chat,
            embedding,
            chat_client: OnceCell::new(),
            embedding_client: OnceCell::new(),
        }
    }

    /// Creates a new service from the environment (see [`crate::config::default_config`]).
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] when a required variable is missing or invalid.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Ok(Self::new(config_openai_chat()?, config_openai_embedding()?))
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the client cannot be built or generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let cli = self.client_for(&self.chat, &self.chat_client).await?;
        cli.generate(prompt, system).await
    }

    /// Computes embeddings using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the client cannot be built or the call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let cli = self
            .client_for(&self.embedding, &self.embedding_client)
            .await?;
        cli.embeddings(input).await
    }

    async fn client_for(
        &self,
        cfg: &LlmModelConfig,
        cell: &OnceCell<Arc<OpenAiService>>,
    ) -> Result<Arc<OpenAiService>, AiLlmError> {
        cell.get_or_try_init(|| async {
            debug!(model = %cfg.model, "building client for profile");
            match cfg.provider {
                LlmProvider::OpenAI => OpenAiService::new(cfg.clone()).map(Arc::new),
            }
        })
        .await
        .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(model: &str, api_key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: model.into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: api_key.map(str::to_string),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(1),
        }
    }

    #[tokio::test]
    async fn client_is_built_once_per_profile() {
        let svc = LlmServiceProfiles::new(
            profile("chat", Some("k")),
            profile("text-embedding-ada-002", Some("k")),
        );

        let a = svc.client_for(&svc.chat, &svc.chat_client).await.unwrap();
        let b = svc.client_for(&svc.chat, &svc.chat_client).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let e = svc
            .client_for(&svc.embedding, &svc.embedding_client)
            .await
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &e));
        assert_eq!(e.config().model, "text-embedding-ada-002");
    }

    #[tokio::test]
    async fn failed_init_is_not_cached() {
        let svc = LlmServiceProfiles::new(profile("chat", None), profile("emb", None));
        assert!(svc.generate("hi", None).await.is_err());
        assert!(svc.chat_client.get().is_none());
    }
}
