//! Catalog store trait and in-memory implementation.

use std::sync::Mutex;

use abode_core::error::AbodeError;
use abode_core::types::{Property, PropertyId};

/// Filters for catalog listing searches.
///
/// City matches are case-insensitive substring matches; price bounds are
/// inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyFilters {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Read access to the property catalog.
///
/// The catalog is created by ingestion (out of scope) and read-only to this
/// core. Implementations over a real backend surface transient failures as
/// `AbodeError::StoreUnavailable`.
pub trait CatalogStore: Send + Sync {
    /// Look up a property by id.
    fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, AbodeError>;

    /// All properties in catalog insertion order.
    fn find_all(&self) -> Result<Vec<Property>, AbodeError>;

    /// Exact case-insensitive title match.
    fn find_by_title_exact(&self, title: &str) -> Result<Option<Property>, AbodeError>;

    /// Case-insensitive substring match on title.
    fn find_by_title_substring(&self, needle: &str) -> Result<Vec<Property>, AbodeError>;

    /// Filtered listing search.
    fn search(&self, filters: &PropertyFilters) -> Result<Vec<Property>, AbodeError>;
}

/// In-memory catalog preserving insertion order.
pub struct InMemoryCatalog {
    properties: Mutex<Vec<Property>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            properties: Mutex::new(Vec::new()),
        }
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties: Mutex::new(properties),
        }
    }

    /// Add a property to the catalog. Test/fixture ingestion path.
    pub fn insert(&self, property: Property) -> Result<(), AbodeError> {
        let mut props = self.lock()?;
        props.push(property);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Property>>, AbodeError> {
        self.properties
            .lock()
            .map_err(|e| AbodeError::StoreUnavailable(format!("Lock poisoned: {}", e)))
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn find_by_id(&self, id: PropertyId) -> Result<Option<Property>, AbodeError> {
        let props = self.lock()?;
        Ok(props.iter().find(|p| p.id == id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Property>, AbodeError> {
        let props = self.lock()?;
        Ok(props.clone())
    }

    fn find_by_title_exact(&self, title: &str) -> Result<Option<Property>, AbodeError> {
        let props = self.lock()?;
        Ok(props
            .iter()
            .find(|p| p.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    fn find_by_title_substring(&self, needle: &str) -> Result<Vec<Property>, AbodeError> {
        let needle = needle.to_lowercase();
        let props = self.lock()?;
        Ok(props
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn search(&self, filters: &PropertyFilters) -> Result<Vec<Property>, AbodeError> {
        let props = self.lock()?;
        let city = filters.city.as_ref().map(|c| c.to_lowercase());
        Ok(props
            .iter()
            .filter(|p| {
                if let Some(ref city) = city {
                    if !p.city.to_lowercase().contains(city.as_str()) {
                        return false;
                    }
                }
                if let Some(min) = filters.min_price {
                    if p.price < min {
                        return false;
                    }
                }
                if let Some(max) = filters.max_price {
                    if p.price > max {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect())
    }
}
