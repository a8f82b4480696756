//! Seams to the external embedding and completion services.
//!
//! The pipeline only talks to these traits; the production implementation is
//! [`LlmServiceProfiles`], tests plug in in-memory fakes.

use std::{future::Future, pin::Pin};

use ai_llm_service::{AiLlmError, LlmServiceProfiles};

/// Boxed future returned by the provider traits.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AiLlmError>> + Send + 'a>>;

/// Turns text into a fixed-dimension vector. One network round trip per call.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> ProviderFuture<'a, Vec<f32>>;
}

/// Generates a reply for a `(system, user)` prompt pair. One round trip per call.
pub trait CompletionProvider: Send + Sync {
    fn complete<'a>(&'a self, system: &'a str, user: &'a str) -> ProviderFuture<'a, String>;
}

impl EmbeddingsProvider for LlmServiceProfiles {
    fn embed<'a>(&'a self, text: &'a str) -> ProviderFuture<'a, Vec<f32>> {
        Box::pin(LlmServiceProfiles::embed(self, text))
    }
}

impl CompletionProvider for LlmServiceProfiles {
    fn complete<'a>(&'a self, system: &'a str, user: &'a str) -> ProviderFuture<'a, String> {
        Box::pin(self.generate(user, Some(system)))
    }
}
