//! Prompt builder: persona system message + context/transcript user prompt.

use site_corpus::ScoredRecord;

use crate::conversation::{ConversationTurn, Role};

/// Default persona for the completion model.
pub const DEFAULT_SYSTEM: &str = "You are George, the salesperson of Bruvi, a coffee brewing brand. \
You will help the customer find the product to purchase. You will be kind, enthusiastic and patient. \
Every time the user asks a question, you will be given some context. \
Only answer the question based on the context. \
If the information is not in the context, just say you don't know.";

/// Default per-summary word budget.
pub const DEFAULT_WORD_LIMIT: usize = 300;

/// Builds the user prompt the completion model continues from.
///
/// Layout (the model conditions on it, so it is fixed):
///
/// ```text
///
/// Context:
/// <summary 1, first `word_limit` words>
/// <summary 2, ...>
///
/// ----
///
/// Q: <history turn>
/// A: <history turn>
/// Q: <query>
/// A:
/// ```
///
/// History turns with an unrecognized role are skipped.
///
/// # Example
/// ```
/// use rag_chat::assemble;
/// let prompt = assemble("Price?", &[], &[], 300);
/// assert!(prompt.ends_with("Q: Price?\nA: "));
/// ```
pub fn assemble(
    query: &str,
    ranked: &[ScoredRecord<'_>],
    history: &[ConversationTurn],
    word_limit: usize,
) -> String {
    let context = ranked
        .iter()
        .map(|r| truncate_words(&r.record.text_summary, word_limit))
        .collect::<Vec<_>>()
        .join("\n");

    let transcript = history
        .iter()
        .filter_map(|turn| {
            turn.role.map(|role| match role {
                Role::Query => format!("Q: {}", turn.text),
                Role::Response => format!("A: {}", turn.text),
            })
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("\nContext:\n{context}\n\n----\n\n{transcript}\nQ: {query}\nA: ")
}

/// Keeps the first `limit` whitespace-delimited words, re-joined by single spaces.
pub fn truncate_words(text: &str, limit: usize) -> String {
    text.split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}
