//! Public API types re-used by external crates (e.g., the HTTP API layer).

use serde::{Deserialize, Serialize};

/// One chat message as stored by the frontend.
///
/// `source` is the broad sender label: `"customer"` for the shopper,
/// `"assistant/openai"`, `"assistant/bruvi"`, ... for responders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub source: String,
}

impl Message {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Full conversation; the last message is the new query.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

/// Page metadata identifying a corpus entry that fed the answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    pub page_title: String,
    pub text_summary: String,
}

/// Model reply plus the references used, in rank order.
///
/// # Example
/// ```
/// use rag_chat::{ChatResponse, Reference};
/// let r = ChatResponse {
///     content: "The Bruvi BV-01 brews in under a minute.".into(),
///     references: vec![Reference {
///         url: "https://bruvi.com/products/bv-01".into(),
///         page_title: "BV-01".into(),
///         text_summary: "Single-serve brewer".into(),
///     }],
/// };
/// assert_eq!(r.references.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    pub references: Vec<Reference>,
}
