//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use site_corpus::Similarity;
use tracing::warn;

use crate::conversation::RoleMapping;
use crate::prompt::{DEFAULT_SYSTEM, DEFAULT_WORD_LIMIT};

/// Knobs of the chat pipeline. All fields have defaults via `from_env`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatConfig {
    /// Number of corpus pages retrieved per query.
    pub top_k: usize,
    /// Per-page word budget in the context block.
    pub word_limit: usize,
    /// Keep only the last N messages (query included); `0` keeps all.
    pub history_limit: usize,
    pub role_mapping: RoleMapping,
    pub similarity: Similarity,
    pub system_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            word_limit: DEFAULT_WORD_LIMIT,
            history_limit: 0,
            role_mapping: RoleMapping::Lenient,
            similarity: Similarity::Dot,
            system_prompt: DEFAULT_SYSTEM.to_string(),
        }
    }
}

impl ChatConfig {
    /// Build from environment variables, falling back to [`ChatConfig::default`].
    ///
    /// - `RAG_TOP_K`, `SUMMARY_WORD_LIMIT`, `CHAT_HISTORY_LIMIT`
    /// - `ROLE_MAPPING` (`lenient` | `strict`), `SIMILARITY` (`dot` | `cosine`)
    /// - `CHAT_SYSTEM_PROMPT`
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            top_k: parse("RAG_TOP_K", d.top_k),
            word_limit: parse("SUMMARY_WORD_LIMIT", d.word_limit),
            history_limit: parse("CHAT_HISTORY_LIMIT", d.history_limit),
            role_mapping: parse("ROLE_MAPPING", d.role_mapping),
            similarity: parse("SIMILARITY", d.similarity),
            system_prompt: std::env::var("CHAT_SYSTEM_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(d.system_prompt),
        }
    }
}

fn parse<T: FromStr>(k: &str, dflt: T) -> T {
    match std::env::var(k) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().unwrap_or_else(|_| {
            warn!(var = k, value = %v, "invalid value, using default");
            dflt
        }),
        _ => dflt,
    }
}
