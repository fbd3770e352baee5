//! Semantic knowledge-base search for Abode.
//!
//! Ranks question/answer entries against a query by cosine similarity over
//! embeddings produced by a pluggable `EmbeddingService`.

pub mod embedding;
pub mod error;
pub mod knowledge;
pub mod ranker;

pub use embedding::{DynEmbeddingService, EmbeddingService, MockEmbedding};
pub use error::SearchError;
pub use knowledge::{InMemoryKnowledgeStore, KnowledgeStore};
pub use ranker::{rebuild_embeddings, RankedEntry, Ranker};
