//! Retrieval configuration.

use std::str::FromStr;

/// Scoring function used by the ranker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Similarity {
    /// Raw inner product. Equals cosine similarity for unit-norm embeddings
    /// (OpenAI embeddings are normalized).
    #[default]
    Dot,
    /// Inner product divided by both magnitudes. Zero-norm vectors score 0.
    Cosine,
}

impl FromStr for Similarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" => Ok(Self::Dot),
            "cosine" => Ok(Self::Cosine),
            other => Err(format!("unknown similarity `{other}` (expected dot|cosine)")),
        }
    }
}
