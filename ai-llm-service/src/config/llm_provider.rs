/// Represents the provider (backend) used for embeddings and chat completions.
///
/// Only OpenAI-compatible HTTP APIs are supported. Any server exposing
/// `/v1/embeddings` and `/v1/chat/completions` with the OpenAI wire format
/// (Azure proxies, vLLM, LiteLLM, ...) is reachable through [`LlmProvider::OpenAI`]
/// by pointing the endpoint at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// OpenAI REST API (or a compatible server).
    OpenAI,
}
