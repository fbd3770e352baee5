//! Multi-strategy reference resolution.
//!
//! A reference is either an ordinal into the most recently shown listing
//! ("second", "2", "last") or a free-text description of a property
//! ("Downtown Loft", "the villa in San Diego"). Ordinals are interpreted
//! against the transcript; everything else runs a ladder of catalog
//! matching strategies, each one looser than the last.

use std::sync::Arc;

use abode_core::config::ResolverConfig;
use abode_core::types::{Property, Transcript};
use abode_catalog::CatalogStore;
use tracing::{debug, info};

use crate::error::{Candidate, ResolveError};
use crate::listing::ListingSnapshot;
use crate::ordinal::{parse_ordinal, OrdinalRef};

/// Resolves raw references to catalog properties.
pub struct Resolver {
    catalog: Arc<dyn CatalogStore>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self::with_config(catalog, ResolverConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn CatalogStore>, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve a raw reference against the transcript and catalog.
    ///
    /// Idempotent: the same inputs always yield the same property or the
    /// same error class.
    pub fn resolve(&self, raw: &str, transcript: &Transcript) -> Result<Property, ResolveError> {
        let reference = raw.trim();

        if let Some(ordinal) = parse_ordinal(reference) {
            return self.resolve_ordinal(reference, ordinal, transcript);
        }

        self.resolve_by_text(reference)
    }

    // -----------------------------------------------------------------
    // Ordinal path
    // -----------------------------------------------------------------

    fn resolve_ordinal(
        &self,
        reference: &str,
        ordinal: OrdinalRef,
        transcript: &Transcript,
    ) -> Result<Property, ResolveError> {
        let snapshot = ListingSnapshot::extract(transcript);

        let title = match ordinal {
            OrdinalRef::Position(n) => snapshot.get(n),
            OrdinalRef::Last => snapshot.last(),
        };

        let Some(title) = title else {
            debug!(reference, "Ordinal reference without a listing in context");
            return Err(ResolveError::NoListingContext {
                reference: reference.to_string(),
            });
        };

        match self.catalog.find_by_title_exact(title)? {
            Some(property) => {
                info!(reference, title = %property.title, "Resolved ordinal reference");
                Ok(property)
            }
            // The listing showed a title the catalog no longer has.
            None => Err(self.not_found(title)?),
        }
    }

    // -----------------------------------------------------------------
    // Text strategies
    // -----------------------------------------------------------------

    fn resolve_by_text(&self, reference: &str) -> Result<Property, ResolveError> {
        // An empty needle substring-matches every title; bail out before
        // the strategies can manufacture candidates from it.
        if reference.is_empty() {
            return Err(self.not_found(reference)?);
        }

        // Strategy 1: exact title match (case-insensitive).
        if let Some(property) = self.catalog.find_by_title_exact(reference)? {
            info!(reference, "Resolved by exact title");
            return Ok(property);
        }

        // Strategy 2: substring match on title.
        let mut matches = self.catalog.find_by_title_substring(reference)?;
        if !matches.is_empty() {
            debug!(reference, count = matches.len(), "Matched by title substring");
        }

        // Strategy 3: substring match on title OR description.
        if matches.is_empty() {
            let needle = reference.to_lowercase();
            matches = self
                .catalog
                .find_all()?
                .into_iter()
                .filter(|p| {
                    contains_ci(&p.title, &needle)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| contains_ci(d, &needle))
                })
                .collect();
            if !matches.is_empty() {
                debug!(reference, count = matches.len(), "Matched by description");
            }
        }

        // Strategy 4: every word must match title, description, or city,
        // in any order. Tolerates city-name typos in multi-word queries.
        if matches.is_empty() {
            let words: Vec<String> = reference
                .split_whitespace()
                .map(|w| w.to_lowercase())
                .collect();
            if !words.is_empty() {
                matches = self
                    .catalog
                    .find_all()?
                    .into_iter()
                    .filter(|p| words.iter().all(|w| property_field_contains(p, w)))
                    .collect();
                if !matches.is_empty() {
                    debug!(reference, count = matches.len(), "Matched by all-words");
                }
            }
        }

        // Strategy 5: try each word alone as a city substring; the first
        // word yielding matches wins.
        if matches.is_empty() {
            let all = self.catalog.find_all()?;
            for word in reference.split_whitespace() {
                let word = word.to_lowercase();
                let city_matches: Vec<Property> = all
                    .iter()
                    .filter(|p| contains_ci(&p.city, &word))
                    .cloned()
                    .collect();
                if !city_matches.is_empty() {
                    debug!(reference, word, count = city_matches.len(), "Matched by city word");
                    matches = city_matches;
                    break;
                }
            }
        }

        match matches.len() {
            0 => Err(self.not_found(reference)?),
            1 => {
                info!(reference, title = %matches[0].title, "Resolved reference");
                Ok(matches.remove(0))
            }
            _ => self.tie_break(reference, matches),
        }
    }

    /// Tie-break: if exactly one candidate's title contains any word of
    /// the reference, pick it; otherwise report ambiguity.
    fn tie_break(
        &self,
        reference: &str,
        matches: Vec<Property>,
    ) -> Result<Property, ResolveError> {
        let words: Vec<String> = reference
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect();

        let mut word_matches: Vec<&Property> = matches
            .iter()
            .filter(|p| words.iter().any(|w| contains_ci(&p.title, w)))
            .collect();

        if word_matches.len() == 1 {
            let property = word_matches.remove(0).clone();
            info!(reference, title = %property.title, "Resolved via tie-break");
            return Ok(property);
        }

        let candidates: Vec<Candidate> = matches
            .iter()
            .take(self.config.max_ambiguous_candidates)
            .map(|p| Candidate {
                title: p.title.clone(),
                city: p.city.clone(),
            })
            .collect();

        debug!(reference, total = matches.len(), "Ambiguous reference");
        Err(ResolveError::Ambiguous {
            reference: reference.to_string(),
            candidates,
        })
    }

    /// Build a `NotFound` error carrying sample catalog titles.
    ///
    /// Returns `Ok(error)` so store failures during suggestion gathering
    /// still propagate as `Store`.
    fn not_found(&self, reference: &str) -> Result<ResolveError, ResolveError> {
        let suggestions: Vec<String> = self
            .catalog
            .find_all()?
            .into_iter()
            .take(self.config.max_suggestions)
            .map(|p| p.title)
            .collect();
        Ok(ResolveError::NotFound {
            reference: reference.to_string(),
            suggestions,
        })
    }
}

fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

fn property_field_contains(p: &Property, lowercase_word: &str) -> bool {
    contains_ci(&p.title, lowercase_word)
        || p.description
            .as_deref()
            .is_some_and(|d| contains_ci(d, lowercase_word))
        || contains_ci(&p.city, lowercase_word)
}
