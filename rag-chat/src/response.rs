//! Packs the model reply and the retrieved pages into a [`ChatResponse`].

use site_corpus::ScoredRecord;

use crate::api_types::{ChatResponse, Reference};

/// References follow rank order; scores and embeddings are not exposed.
pub fn format_response(content: String, ranked: &[ScoredRecord<'_>]) -> ChatResponse {
    let references = ranked
        .iter()
        .map(|s| Reference {
            url: s.record.url.clone(),
            page_title: s.record.page_title.clone(),
            text_summary: s.record.text_summary.clone(),
        })
        .collect();

    ChatResponse {
        content,
        references,
    }
}
