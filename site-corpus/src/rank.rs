//! Brute-force similarity ranking over the whole corpus.

use tracing::trace;

use crate::config::Similarity;
use crate::errors::RankError;
use crate::record::ScoredRecord;
use crate::store::CorpusStore;

/// Scores every record against `query`, returns the best `min(k, len)`.
///
/// Output is sorted by non-increasing score. Equal scores keep corpus order
/// (the sort is stable), so identical inputs always give identical output.
///
/// # Errors
/// - [`RankError::InvalidK`] if `k == 0`
/// - [`RankError::DimensionMismatch`] if `query.len() != corpus.dim()`
///
/// # Example
/// ```
/// use site_corpus::{CorpusRecord, CorpusStore, Similarity, rank};
///
/// let rec = |s: &str, e: Vec<f32>| CorpusRecord {
///     url: String::new(),
///     page_title: String::new(),
///     text_summary: s.into(),
///     embedding: e,
/// };
/// let corpus = CorpusStore::from_records(vec![
///     rec("A B C D E", vec![1.0, 0.0]),
///     rec("X Y", vec![0.0, 1.0]),
/// ])
/// .unwrap();
///
/// let top = rank(&[1.0, 0.0], &corpus, 1, Similarity::Dot).unwrap();
/// assert_eq!(top.len(), 1);
/// assert_eq!(top[0].record.text_summary, "A B C D E");
/// assert_eq!(top[0].score, 1.0);
/// ```
pub fn rank<'a>(
    query: &[f32],
    corpus: &'a CorpusStore,
    k: usize,
    similarity: Similarity,
) -> Result<Vec<ScoredRecord<'a>>, RankError> {
    if k == 0 {
        return Err(RankError::InvalidK(k));
    }
    if query.len() != corpus.dim() {
        return Err(RankError::DimensionMismatch {
            got: query.len(),
            want: corpus.dim(),
        });
    }

    let query_norm = match similarity {
        Similarity::Dot => 1.0,
        Similarity::Cosine => norm(query),
    };

    let mut scored: Vec<ScoredRecord<'a>> = corpus
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let raw = dot(&record.embedding, query);
            let score = match similarity {
                Similarity::Dot => raw,
                Similarity::Cosine => {
                    let denom = norm(&record.embedding) * query_norm;
                    if denom > 0.0 { raw / denom } else { 0.0 }
                }
            };
            ScoredRecord {
                index,
                record,
                score,
            }
        })
        .collect();

    // `sort_by` is stable: ties keep ascending corpus index.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k);

    trace!(
        k,
        returned = scored.len(),
        best = scored.first().map(|s| s.score),
        "ranked corpus"
    );
    Ok(scored)
}

/// Inner product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CorpusRecord;

    fn rec(summary: &str, embedding: Vec<f32>) -> CorpusRecord {
        CorpusRecord {
            url: format!("https://bruvi.com/{}", summary.replace(' ', "-")),
            page_title: summary.into(),
            text_summary: summary.into(),
            embedding,
        }
    }

    fn corpus(rows: Vec<CorpusRecord>) -> CorpusStore {
        CorpusStore::from_records(rows).unwrap()
    }

    #[test]
    fn picks_best_match_and_excludes_rest() {
        let c = corpus(vec![rec("A B C D E", vec![1.0, 0.0]), rec("X Y", vec![0.0, 1.0])]);
        let top = rank(&[1.0, 0.0], &c, 1, Similarity::Dot).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].index, 0);
        assert_eq!(top[0].record.text_summary, "A B C D E");
        assert_eq!(top[0].score, 1.0);
    }

    #[test]
    fn returns_k_sorted_non_increasing() {
        let c = corpus(vec![
            rec("a", vec![0.1, 0.0]),
            rec("b", vec![0.9, 0.0]),
            rec("c", vec![0.5, 0.0]),
            rec("d", vec![-1.0, 0.0]),
            rec("e", vec![0.7, 0.0]),
        ]);
        for k in 1..=c.len() {
            let top = rank(&[1.0, 0.0], &c, k, Similarity::Dot).unwrap();
            assert_eq!(top.len(), k);
            assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        }
        let all = rank(&[1.0, 0.0], &c, 5, Similarity::Dot).unwrap();
        let order: Vec<usize> = all.iter().map(|s| s.index).collect();
        assert_eq!(order, vec![1, 4, 2, 0, 3]);
    }

    #[test]
    fn k_larger_than_corpus_returns_everything() {
        let c = corpus(vec![rec("a", vec![0.2]), rec("b", vec![0.8])]);
        let top = rank(&[1.0], &c, 10, Similarity::Dot).unwrap();
        assert_eq!(top.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn ties_keep_corpus_order_and_are_repeatable() {
        let c = corpus(vec![
            rec("low", vec![0.0, 1.0]),
            rec("tie-1", vec![1.0, 0.0]),
            rec("tie-2", vec![1.0, 0.0]),
            rec("tie-3", vec![1.0, 0.0]),
        ]);
        let first: Vec<usize> = rank(&[1.0, 0.0], &c, 4, Similarity::Dot)
            .unwrap()
            .iter()
            .map(|s| s.index)
            .collect();
        assert_eq!(first, vec![1, 2, 3, 0]);

        for _ in 0..5 {
            let again: Vec<usize> = rank(&[1.0, 0.0], &c, 4, Similarity::Dot)
                .unwrap()
                .iter()
                .map(|s| s.index)
                .collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn zero_k_is_rejected() {
        let c = corpus(vec![rec("a", vec![1.0])]);
        assert_eq!(
            rank(&[1.0], &c, 0, Similarity::Dot).unwrap_err(),
            RankError::InvalidK(0)
        );
    }

    #[test]
    fn wrong_query_dimension_is_rejected() {
        let c = corpus(vec![rec("a", vec![1.0, 0.0])]);
        assert_eq!(
            rank(&[1.0, 0.0, 0.0], &c, 1, Similarity::Dot).unwrap_err(),
            RankError::DimensionMismatch { got: 3, want: 2 }
        );
    }

    #[test]
    fn dot_uses_raw_magnitudes_cosine_does_not() {
        // Long vector pointing slightly off-axis vs. short vector on-axis.
        let c = corpus(vec![rec("long", vec![3.0, 3.0]), rec("short", vec![0.5, 0.0])]);

        let by_dot = rank(&[1.0, 0.0], &c, 2, Similarity::Dot).unwrap();
        assert_eq!(by_dot[0].record.text_summary, "long");
        assert_eq!(by_dot[0].score, 3.0);

        let by_cos = rank(&[1.0, 0.0], &c, 2, Similarity::Cosine).unwrap();
        assert_eq!(by_cos[0].record.text_summary, "short");
        assert!((by_cos[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_scores_zero() {
        let c = corpus(vec![rec("zero", vec![0.0, 0.0]), rec("unit", vec![0.0, 1.0])]);
        let top = rank(&[0.0, 1.0], &c, 2, Similarity::Cosine).unwrap();
        assert_eq!(top[0].record.text_summary, "unit");
        assert_eq!(top[1].score, 0.0);
    }
}
