//! OpenAI-compatible LLM service used by the chat backend.
//!
//! - [`services::open_ai_service::OpenAiService`]: embeddings and chat completions
//! - [`service_profiles::LlmServiceProfiles`]: chat/embedding profiles with memoized clients
//! - [`error_handler`]: unified [`AiLlmError`] and env helpers
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
