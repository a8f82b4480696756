//! Pre-embedded website corpus: snapshot loading, memoized store, ranking.
//!
//! The corpus is a fixed table of pages (`url`, `page_title`, `text_summary`,
//! `embedding`) read once from a JSONL snapshot and kept read-only for the
//! process lifetime. Retrieval is an exhaustive scan: the corpus is a single
//! website, small enough that an index would cost more than it saves.

mod config;
mod errors;
mod rank;
mod record;
mod snapshot;
mod store;

pub use config::Similarity;
pub use errors::{CorpusError, RankError};
pub use rank::{dot, rank};
pub use record::{CorpusRecord, ScoredRecord};
pub use snapshot::{parse_snapshot, read_snapshot};
pub use store::{CorpusStore, SharedCorpus};
