//! Default LLM configs loaded from environment variables.
//!
//! Two roles are provided, both backed by an OpenAI-compatible API:
//!
//! - **Chat**      → chat-completion model that writes the reply
//! - **Embedding** → embedding generator used for retrieval
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`   = bearer token (mandatory)
//! - `OPENAI_URL`       = API base, defaults to `https://api.openai.com`
//! - `CHAT_MODEL`       = chat model, defaults to `gpt-3.5-turbo`
//! - `EMBEDDING_MODEL`  = embedding model, defaults to `text-embedding-ada-002`
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (0.0..=2.0)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 60)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, env_opt_f32, env_opt_u32, env_opt_u64, env_or, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

/// Default OpenAI API base.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
/// Default chat-completion model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
/// Default embedding model (1536 dimensions).
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
/// Timeout applied when `LLM_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Resolves the API base and validates its scheme.
fn openai_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url)
}

/// Constructs the **chat** profile.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `CHAT_MODEL`, `LLM_MAX_TOKENS`, `LLM_TEMPERATURE`, `LLM_TIMEOUT_SECS` (optional)
///
/// # Errors
/// - [`crate::error_handler::ConfigError::MissingVar`] if the API key is unset
/// - [`crate::error_handler::ConfigError::InvalidNumber`] on unparsable numbers
/// - [`crate::error_handler::ConfigError::OutOfRange`] if the temperature is outside `0.0..=2.0`
pub fn config_openai_chat() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = openai_endpoint()?;
    let api_key = must_env("OPENAI_API_KEY")?;
    let temperature = env_opt_f32("LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("CHAT_MODEL", DEFAULT_CHAT_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature,
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Constructs the **embedding** profile.
///
/// # Env
/// - `OPENAI_API_KEY` (required)
/// - `EMBEDDING_MODEL`, `LLM_TIMEOUT_SECS` (optional)
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = openai_endpoint()?;
    let api_key = must_env("OPENAI_API_KEY")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint,
        api_key: Some(api_key),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}
