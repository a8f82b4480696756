//! Read-only corpus and its process-wide memoized accessor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::errors::CorpusError;
use crate::record::CorpusRecord;
use crate::snapshot::read_snapshot;

/// Ordered, immutable set of corpus records sharing one embedding dimension.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    records: Vec<CorpusRecord>,
    dim: usize,
}

impl CorpusStore {
    /// Builds a store from already-parsed records.
    ///
    /// # Errors
    /// - [`CorpusError::Empty`] if `records` is empty or embeddings have no dimensions.
    /// - [`CorpusError::DimensionMismatch`] if embeddings differ in length
    ///   (`line` is the 1-based row position).
    pub fn from_records(records: Vec<CorpusRecord>) -> Result<Self, CorpusError> {
        let dim = match records.first() {
            None => return Err(CorpusError::Empty("no rows".into())),
            Some(r) if r.embedding.is_empty() => {
                return Err(CorpusError::Empty("embeddings have zero dimensions".into()));
            }
            Some(r) => r.embedding.len(),
        };

        if let Some((i, r)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.embedding.len() != dim)
        {
            return Err(CorpusError::DimensionMismatch {
                line: i + 1,
                got: r.embedding.len(),
                want: dim,
            });
        }

        Ok(Self { records, dim })
    }

    /// Reads a JSONL snapshot from disk (blocking).
    ///
    /// # Errors
    /// Any [`CorpusError`] from the snapshot reader.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        Self::from_records(read_snapshot(path)?)
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&CorpusRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the store holds no records; never the case after construction.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension shared by every record.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

/// Lazily loaded, process-wide corpus.
///
/// The first [`SharedCorpus::get`] reads the snapshot on the blocking pool;
/// concurrent first callers wait for that single load. A failed load is not
/// cached, so a later call retries it.
#[derive(Debug)]
pub struct SharedCorpus {
    path: PathBuf,
    cell: OnceCell<Arc<CorpusStore>>,
}

impl SharedCorpus {
    /// Accessor that will load `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Accessor over an already-built store (tests, embedding the corpus in-process).
    pub fn preloaded(store: CorpusStore) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceCell::new_with(Some(Arc::new(store))),
        }
    }

    /// Whether the corpus has been loaded already.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the corpus, loading it on first use.
    ///
    /// # Errors
    /// [`CorpusError`] if the snapshot cannot be loaded.
    pub async fn get(&self) -> Result<Arc<CorpusStore>, CorpusError> {
        self.cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                debug!(path = ?path, "loading corpus snapshot");
                let store = tokio::task::spawn_blocking(move || CorpusStore::load(path)).await??;
                info!(
                    records = store.len(),
                    dim = store.dim(),
                    "corpus loaded"
                );
                Ok::<_, CorpusError>(Arc::new(store))
            })
            .await
            .cloned()
    }
}
