//! Text embedding providers.
//!
//! The ranker and the rebuild batch both talk to an [`EmbeddingService`].
//! A real deployment wires in a sentence-transformer backend behind this
//! trait; `MockEmbedding` stands in for it with deterministic
//! pseudo-random unit vectors, so similarity plumbing can be exercised
//! without a model on disk.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::SearchError;

/// Turns a piece of text into a fixed-dimension vector.
pub trait EmbeddingService: Send + Sync {
    /// Embed one piece of text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, SearchError>> + Send;

    /// Length of every vector this service produces.
    fn dimensions(&self) -> usize;
}

/// Dyn-compatible counterpart of [`EmbeddingService`].
///
/// `embed` returns `impl Future`, which rules out `dyn EmbeddingService`.
/// Anything that needs a runtime-chosen provider holds an
/// `Arc<dyn DynEmbeddingService>` and calls `embed_boxed` instead. The
/// blanket impl keeps the two traits in lockstep; implementors only ever
/// write the static one.
pub trait DynEmbeddingService: Send + Sync {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, SearchError>> + Send + 'a>,
    >;

    fn dimensions(&self) -> usize;
}

impl<T: EmbeddingService> DynEmbeddingService for T {
    fn embed_boxed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<f32>, SearchError>> + Send + 'a>,
    > {
        Box::pin(self.embed(text))
    }

    fn dimensions(&self) -> usize {
        EmbeddingService::dimensions(self)
    }
}

/// Deterministic stand-in for a real embedding backend.
///
/// Seeds a xorshift stream from the text's hash and draws one component
/// per dimension, then scales the result to unit length the way a
/// sentence-transformer head would. Same text, same vector, every run;
/// distinct texts diverge after the first step.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedding;

impl MockEmbedding {
    pub const DIMENSIONS: usize = 384;

    pub fn new() -> Self {
        Self
    }

    fn hash_to_vector(text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        // A zero seed would collapse the xorshift stream.
        let mut state = hasher.finish() | 1;

        let mut components = Vec::with_capacity(Self::DIMENSIONS);
        for _ in 0..Self::DIMENSIONS {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            components.push(state as i64 as f64);
        }

        let norm = components.iter().map(|v| v * v).sum::<f64>().sqrt();
        components.into_iter().map(|v| (v / norm) as f32).collect()
    }
}

impl EmbeddingService for MockEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, SearchError> {
        if text.is_empty() {
            return Err(SearchError::ProviderUnavailable(
                "cannot embed empty text".to_string(),
            ));
        }
        Ok(Self::hash_to_vector(text))
    }

    fn dimensions(&self) -> usize {
        Self::DIMENSIONS
    }
}
