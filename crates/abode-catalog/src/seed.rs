//! Deterministic seed fixtures for tests and demos.

use abode_core::types::{KnowledgeEntry, EntryId, Property, PropertyId};
use chrono::Utc;

use crate::store::InMemoryCatalog;

const SEED_PROPERTIES: &[(&str, &str, &str, f64, f64)] = &[
    (
        "Luxury Downtown Apartment",
        "Beautiful property with stunning views and modern amenities.",
        "New York",
        850_000.0,
        1_200.0,
    ),
    (
        "Spacious Family Home",
        "Perfect for families, featuring a large backyard and updated kitchen.",
        "Chicago",
        450_000.0,
        2_400.0,
    ),
    (
        "Modern City Condo",
        "Located in the heart of downtown with easy access to transportation.",
        "Los Angeles",
        620_000.0,
        950.0,
    ),
    (
        "Charming Suburban House",
        "Quiet neighborhood with excellent schools nearby.",
        "Houston",
        380_000.0,
        1_900.0,
    ),
    (
        "Beachfront Villa",
        "Wake up to ocean views in this luxurious property.",
        "San Diego",
        1_750_000.0,
        3_200.0,
    ),
    (
        "Cozy Studio Apartment",
        "Ideal starter home with low maintenance costs.",
        "Philadelphia",
        210_000.0,
        520.0,
    ),
    (
        "Executive Penthouse",
        "Top floor unit with panoramic city views.",
        "New York",
        1_950_000.0,
        2_100.0,
    ),
    (
        "Renovated Townhouse",
        "Completely remodeled with high-end finishes.",
        "Austin",
        540_000.0,
        1_650.0,
    ),
];

const SEED_FAQS: &[(&str, &str, &[&str])] = &[
    (
        "What documents do I need to buy a property?",
        "You typically need proof of identity, proof of address, bank statements, \
         proof of income, a mortgage agreement in principle, and your solicitor's details.",
        &["buying", "documents"],
    ),
    (
        "How long does the home buying process take?",
        "Typically 8-12 weeks from offer acceptance to completion, depending on the \
         chain, mortgage approval speed, and how quickly searches complete.",
        &["buying", "timeline"],
    ),
    (
        "What is a mortgage pre-approval?",
        "A lender's conditional commitment to loan you a specific amount. It gives you \
         a clear budget and shows sellers you're a serious buyer.",
        &["mortgage", "finance"],
    ),
    (
        "What are closing costs?",
        "Fees paid at the end of a transaction: solicitor fees, survey costs, mortgage \
         arrangement fees, stamp duty, and search fees. Expect 3-5% of the price.",
        &["buying", "fees"],
    ),
    (
        "Are property prices negotiable?",
        "Yes, asking prices are usually negotiable. Research comparable sales and be \
         prepared to justify your offer.",
        &["buying", "negotiation"],
    ),
];

/// Build a catalog populated with the fixture properties.
pub fn seed_catalog() -> InMemoryCatalog {
    InMemoryCatalog::with_properties(seed_properties())
}

/// The fixture properties, in listing order.
pub fn seed_properties() -> Vec<Property> {
    SEED_PROPERTIES
        .iter()
        .map(|(title, description, city, price, size)| Property {
            id: PropertyId::new(),
            title: (*title).to_string(),
            description: Some((*description).to_string()),
            city: (*city).to_string(),
            price: *price,
            size_sqft: Some(*size),
            created_at: Utc::now(),
        })
        .collect()
}

/// The fixture FAQ entries, without embeddings.
pub fn seed_knowledge_entries() -> Vec<KnowledgeEntry> {
    SEED_FAQS
        .iter()
        .map(|(question, answer, tags)| KnowledgeEntry {
            id: EntryId::new(),
            question: (*question).to_string(),
            answer: (*answer).to_string(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            embedding: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CatalogStore;

    #[test]
    fn test_seed_catalog_populated() {
        let catalog = seed_catalog();
        let all = catalog.find_all().unwrap();
        assert_eq!(all.len(), SEED_PROPERTIES.len());
        assert_eq!(all[0].title, "Luxury Downtown Apartment");
    }

    #[test]
    fn test_seed_titles_unique() {
        let props = seed_properties();
        let mut titles: Vec<&str> = props.iter().map(|p| p.title.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), props.len());
    }

    #[test]
    fn test_seed_knowledge_entries_have_no_embeddings() {
        for entry in seed_knowledge_entries() {
            assert!(entry.embedding.is_none());
            assert!(!entry.tags.is_empty());
        }
    }
}
