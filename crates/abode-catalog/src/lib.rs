//! Property catalog access for Abode.
//!
//! Exposes the read-only [`CatalogStore`] trait the resolver and scheduler
//! depend on, an in-memory implementation, and deterministic seed fixtures
//! for tests and demos.

pub mod seed;
pub mod store;

pub use store::{CatalogStore, InMemoryCatalog, PropertyFilters};
