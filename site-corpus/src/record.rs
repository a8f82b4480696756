//! Core data models used by the library.

use serde::{Deserialize, Serialize};

/// One indexed website page with its precomputed embedding.
///
/// Identity is the row position in the snapshot; there is no explicit key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub url: String,
    pub page_title: String,
    pub text_summary: String,
    pub embedding: Vec<f32>,
}

/// A corpus record paired with its similarity to a query.
///
/// Borrowed from the store: produced per query and dropped with the request.
#[derive(Clone, Copy, Debug)]
pub struct ScoredRecord<'a> {
    /// Row position in the corpus.
    pub index: usize,
    pub record: &'a CorpusRecord,
    pub score: f32,
}
