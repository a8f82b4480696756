//! Model/provider configuration and env-driven defaults.

pub mod default_config;
pub mod llm_model_config;
pub mod llm_provider;
