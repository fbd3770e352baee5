//! Knowledge base store trait and in-memory implementation.

use std::sync::Mutex;

use abode_core::error::AbodeError;
use abode_core::types::{EntryId, KnowledgeEntry};

/// Persistence for question/answer entries and their embeddings.
pub trait KnowledgeStore: Send + Sync {
    /// All entries in insertion order.
    fn all(&self) -> Result<Vec<KnowledgeEntry>, AbodeError>;

    /// Entries that currently carry an embedding, in insertion order.
    fn with_embeddings(&self) -> Result<Vec<KnowledgeEntry>, AbodeError>;

    /// Drop every stored embedding. First step of a full rebuild.
    fn clear_embeddings(&self) -> Result<(), AbodeError>;

    /// Attach an embedding to an entry. Returns false if the id is unknown.
    fn set_embedding(&self, id: EntryId, embedding: Vec<f32>) -> Result<bool, AbodeError>;

    fn insert(&self, entry: KnowledgeEntry) -> Result<(), AbodeError>;
}

/// In-memory knowledge store preserving insertion order.
pub struct InMemoryKnowledgeStore {
    entries: Mutex<Vec<KnowledgeEntry>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<KnowledgeEntry>>, AbodeError> {
        self.entries
            .lock()
            .map_err(|e| AbodeError::StoreUnavailable(format!("Lock poisoned: {}", e)))
    }
}

impl Default for InMemoryKnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeStore for InMemoryKnowledgeStore {
    fn all(&self) -> Result<Vec<KnowledgeEntry>, AbodeError> {
        let entries = self.lock()?;
        Ok(entries.clone())
    }

    fn with_embeddings(&self) -> Result<Vec<KnowledgeEntry>, AbodeError> {
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .filter(|e| e.embedding.is_some())
            .cloned()
            .collect())
    }

    fn clear_embeddings(&self) -> Result<(), AbodeError> {
        let mut entries = self.lock()?;
        for entry in entries.iter_mut() {
            entry.embedding = None;
        }
        Ok(())
    }

    fn set_embedding(&self, id: EntryId, embedding: Vec<f32>) -> Result<bool, AbodeError> {
        let mut entries = self.lock()?;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.embedding = Some(embedding);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert(&self, entry: KnowledgeEntry) -> Result<(), AbodeError> {
        let mut entries = self.lock()?;
        entries.push(entry);
        Ok(())
    }
}
