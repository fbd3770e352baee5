//! Cosine-similarity ranking over embedded knowledge entries.

use std::cmp::Ordering;
use std::sync::Arc;

use abode_core::types::KnowledgeEntry;
use tracing::{debug, info};

use crate::embedding::DynEmbeddingService;
use crate::error::SearchError;
use crate::knowledge::KnowledgeStore;

/// A knowledge entry with its similarity score against the query.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RankedEntry {
    pub entry: KnowledgeEntry,
    pub score: f64,
}

/// Ranks knowledge entries against a query by embedding similarity.
pub struct Ranker {
    store: Arc<dyn KnowledgeStore>,
    provider: Arc<dyn DynEmbeddingService>,
}

impl Ranker {
    pub fn new(store: Arc<dyn KnowledgeStore>, provider: Arc<dyn DynEmbeddingService>) -> Self {
        Self { store, provider }
    }

    /// Rank all embedded entries against the query, best first.
    ///
    /// Embeds the query exactly once. Entries without an embedding are
    /// excluded; a store with no embedded entries yields an empty result,
    /// not an error. A stored embedding whose dimension differs from the
    /// query's fails the whole call. Ties keep insertion order (stable
    /// sort), and at most `top_k` entries come back.
    pub async fn rank(&self, query: &str, top_k: usize) -> Result<Vec<RankedEntry>, SearchError> {
        let query_vec = self.provider.embed_boxed(query).await?;

        let candidates = self.store.with_embeddings()?;
        if candidates.is_empty() {
            debug!(query, "No embedded entries to rank");
            return Ok(Vec::new());
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for entry in candidates {
            // with_embeddings guarantees the vector is present.
            let Some(embedding) = entry.embedding.as_deref() else {
                continue;
            };
            if embedding.len() != query_vec.len() {
                return Err(SearchError::DimensionMismatch {
                    expected: query_vec.len(),
                    got: embedding.len(),
                });
            }
            let score = cosine_similarity(&query_vec, embedding);
            ranked.push(RankedEntry { entry, score });
        }

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(top_k.max(1));

        debug!(query, results = ranked.len(), "Ranked knowledge entries");
        Ok(ranked)
    }
}

/// Cosine similarity between two equal-length vectors, computed in f64.
///
/// A zero-norm vector scores 0 against anything.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Regenerate every entry's embedding from scratch.
///
/// Embeds `question + " " + answer` for every entry before touching the
/// store, then swaps the full set in: clear, write, done. A provider
/// failure mid-batch leaves the stored vectors exactly as they were.
/// Always a full rebuild, never incremental, so a model change cannot
/// leave mixed-dimension vectors behind. Returns the number of entries
/// embedded.
pub async fn rebuild_embeddings(
    store: &dyn KnowledgeStore,
    provider: &dyn DynEmbeddingService,
) -> Result<usize, SearchError> {
    let entries = store.all()?;

    let mut staged = Vec::with_capacity(entries.len());
    for entry in &entries {
        let text = format!("{} {}", entry.question, entry.answer);
        let embedding = provider.embed_boxed(&text).await?;
        staged.push((entry.id, embedding));
    }

    store.clear_embeddings()?;
    let mut count = 0usize;
    for (id, embedding) in staged {
        if store.set_embedding(id, embedding)? {
            count += 1;
        }
    }

    info!(entries = count, "Rebuilt knowledge embeddings");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbeddingService, MockEmbedding};
    use crate::knowledge::InMemoryKnowledgeStore;
    use abode_core::types::EntryId;

    /// Test provider with a fixed query vector, so similarity scores can be
    /// arranged by hand through the stored embeddings.
    struct FixedEmbedding(Vec<f32>);

    impl EmbeddingService for FixedEmbedding {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, SearchError> {
            Ok(self.0.clone())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }
    }

    struct FailingEmbedding;

    impl EmbeddingService for FailingEmbedding {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, SearchError> {
            Err(SearchError::ProviderUnavailable("model offline".to_string()))
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    fn make_entry(question: &str, embedding: Option<Vec<f32>>) -> KnowledgeEntry {
        KnowledgeEntry {
            id: EntryId::new(),
            question: question.to_string(),
            answer: "an answer".to_string(),
            tags: Vec::new(),
            embedding,
        }
    }

    #[test]
    fn test_cosine_identical_vectors() {
        let v = [0.5f32, 0.5, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_rank_orders_by_similarity() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![
            make_entry("far?", Some(vec![0.0, 1.0])),
            make_entry("near?", Some(vec![1.0, 0.1])),
            make_entry("opposite?", Some(vec![-1.0, 0.0])),
        ]));
        let provider = Arc::new(FixedEmbedding(vec![1.0, 0.0]));
        let ranker = Ranker::new(store, provider);

        let ranked = ranker.rank("anything", 10).await.unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].entry.question, "near?");
        assert_eq!(ranked[1].entry.question, "far?");
        assert_eq!(ranked[2].entry.question, "opposite?");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[tokio::test]
    async fn test_rank_truncates_to_top_k() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![
            make_entry("a?", Some(vec![1.0, 0.0])),
            make_entry("b?", Some(vec![0.9, 0.1])),
            make_entry("c?", Some(vec![0.0, 1.0])),
        ]));
        let ranker = Ranker::new(store, Arc::new(FixedEmbedding(vec![1.0, 0.0])));
        let ranked = ranker.rank("q", 2).await.unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[tokio::test]
    async fn test_rank_skips_entries_without_embeddings() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![
            make_entry("embedded?", Some(vec![1.0, 0.0])),
            make_entry("bare?", None),
        ]));
        let ranker = Ranker::new(store, Arc::new(FixedEmbedding(vec![1.0, 0.0])));
        let ranked = ranker.rank("q", 10).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].entry.question, "embedded?");
    }

    #[tokio::test]
    async fn test_rank_empty_store_is_ok() {
        let store = Arc::new(InMemoryKnowledgeStore::new());
        let ranker = Ranker::new(store, Arc::new(FixedEmbedding(vec![1.0, 0.0])));
        assert!(ranker.rank("q", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rank_dimension_mismatch_is_fatal() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![
            make_entry("ok?", Some(vec![1.0, 0.0])),
            make_entry("wrong-model?", Some(vec![1.0, 0.0, 0.0])),
        ]));
        let ranker = Ranker::new(store, Arc::new(FixedEmbedding(vec![1.0, 0.0])));
        let err = ranker.rank("q", 10).await.unwrap_err();
        match err {
            SearchError::DimensionMismatch { expected, got } => {
                assert_eq!(expected, 2);
                assert_eq!(got, 3);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rank_provider_failure() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![make_entry(
            "q?",
            Some(vec![1.0]),
        )]));
        let ranker = Ranker::new(store, Arc::new(FailingEmbedding));
        let err = ranker.rank("q", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_rank_ties_keep_insertion_order() {
        let store = Arc::new(InMemoryKnowledgeStore::with_entries(vec![
            make_entry("first-tied?", Some(vec![1.0, 0.0])),
            make_entry("second-tied?", Some(vec![2.0, 0.0])), // same direction, same cosine
        ]));
        let ranker = Ranker::new(store, Arc::new(FixedEmbedding(vec![1.0, 0.0])));
        let ranked = ranker.rank("q", 10).await.unwrap();
        assert_eq!(ranked[0].entry.question, "first-tied?");
        assert_eq!(ranked[1].entry.question, "second-tied?");
    }

    #[tokio::test]
    async fn test_rebuild_embeds_every_entry() {
        let store = InMemoryKnowledgeStore::with_entries(vec![
            make_entry("what are the fees?", None),
            make_entry("how do viewings work?", Some(vec![0.1, 0.2])),
        ]);
        let provider = MockEmbedding::new();

        let count = rebuild_embeddings(&store, &provider).await.unwrap();
        assert_eq!(count, 2);

        let embedded = store.with_embeddings().unwrap();
        assert_eq!(embedded.len(), 2);
        for entry in &embedded {
            assert_eq!(entry.embedding.as_ref().map(Vec::len), Some(384));
        }
    }

    #[tokio::test]
    async fn test_rebuild_replaces_stale_vectors() {
        let store = InMemoryKnowledgeStore::with_entries(vec![make_entry(
            "q?",
            Some(vec![9.9, 9.9]), // stale, wrong dimension
        )]);
        rebuild_embeddings(&store, &MockEmbedding::new()).await.unwrap();

        let embedded = store.with_embeddings().unwrap();
        assert_eq!(embedded[0].embedding.as_ref().map(Vec::len), Some(384));
    }

    #[tokio::test]
    async fn test_rebuild_keeps_old_vectors_on_provider_failure() {
        let store = InMemoryKnowledgeStore::with_entries(vec![make_entry(
            "q?",
            Some(vec![0.1, 0.2]),
        )]);

        let err = rebuild_embeddings(&store, &FailingEmbedding)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::ProviderUnavailable(_)));

        // The failed rebuild must not have wiped the existing vectors.
        let embedded = store.with_embeddings().unwrap();
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].embedding.as_deref(), Some([0.1, 0.2].as_slice()));
    }

    #[tokio::test]
    async fn test_rebuild_uses_question_and_answer() {
        let store = InMemoryKnowledgeStore::with_entries(vec![make_entry("q?", None)]);
        let provider = MockEmbedding::new();
        rebuild_embeddings(&store, &provider).await.unwrap();

        let entry = &store.with_embeddings().unwrap()[0];
        let expected = provider.embed("q? an answer").await.unwrap();
        assert_eq!(entry.embedding.as_deref(), Some(expected.as_slice()));
    }
}
