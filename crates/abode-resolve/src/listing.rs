//! Numbered-listing extraction from conversation transcripts.
//!
//! When the assistant shows search results it renders them as a numbered
//! list ("1. Luxury Downtown Apartment", possibly with Markdown bold).
//! Ordinal references like "the second one" are interpreted against the
//! *most recently shown* list, so extraction scans newest-first and stops
//! at the first turn containing listing markup.

use std::sync::LazyLock;

use abode_core::types::Transcript;
use regex::Regex;

// Matches "N. Title" at the start of a line, tolerating leading whitespace
// and Markdown bold markers around the item.
static LISTING_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:\*\*)?(\d+)\.\s+(.+?)\s*$").expect("Invalid listing regex")
});

/// Derived position -> title index for the most recent numbered listing.
///
/// Ephemeral: recomputed from the transcript on every resolution, never
/// cached across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingSnapshot {
    entries: Vec<(u32, String)>,
}

impl ListingSnapshot {
    /// Extract the listing snapshot from a transcript.
    ///
    /// Scans turns most-recent-first; the first turn containing any
    /// numbered-listing markup contributes all of its (position, title)
    /// pairs and older listings are ignored. Returns an empty snapshot
    /// when no turn matches.
    pub fn extract(transcript: &Transcript) -> Self {
        for turn in transcript.turns_newest_first() {
            let entries = Self::scan_turn(&turn.text);
            if !entries.is_empty() {
                tracing::debug!(items = entries.len(), "Extracted listing from transcript");
                return Self { entries };
            }
        }
        Self::default()
    }

    fn scan_turn(text: &str) -> Vec<(u32, String)> {
        LISTING_ITEM_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let position: u32 = caps.get(1)?.as_str().parse().ok()?;
                if position == 0 {
                    return None;
                }
                let title = caps
                    .get(2)?
                    .as_str()
                    .trim_end_matches("**")
                    .trim()
                    .to_string();
                if title.is_empty() {
                    return None;
                }
                Some((position, title))
            })
            .collect()
    }

    /// Title at the given 1-based position.
    pub fn get(&self, position: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, t)| t.as_str())
    }

    /// Title at the highest position ("last").
    pub fn last(&self) -> Option<&str> {
        self.entries
            .iter()
            .max_by_key(|(p, _)| *p)
            .map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abode_core::types::{Transcript, Turn};

    fn transcript_with_listing() -> Transcript {
        Transcript::from_turns(vec![
            Turn::user("show me properties in New York"),
            Turn::assistant(
                "Found 2 properties:\n\
                 **1. Luxury Downtown Apartment**\n   New York\n\
                 **2. Spacious Family Home**\n   Chicago\n",
            ),
            Turn::user("tell me about the second one"),
        ])
    }

    #[test]
    fn test_extract_basic_listing() {
        let snapshot = ListingSnapshot::extract(&transcript_with_listing());
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(1), Some("Luxury Downtown Apartment"));
        assert_eq!(snapshot.get(2), Some("Spacious Family Home"));
    }

    #[test]
    fn test_extract_plain_numbering_without_bold() {
        let t = Transcript::from_turns(vec![Turn::assistant(
            "1. Beachfront Villa\n2. Cozy Studio Apartment\n3. Executive Penthouse",
        )]);
        let snapshot = ListingSnapshot::extract(&t);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(3), Some("Executive Penthouse"));
    }

    #[test]
    fn test_extract_uses_most_recent_listing_only() {
        let t = Transcript::from_turns(vec![
            Turn::assistant("1. Old First\n2. Old Second"),
            Turn::user("search again"),
            Turn::assistant("1. New First\n2. New Second\n3. New Third"),
        ]);
        let snapshot = ListingSnapshot::extract(&t);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(1), Some("New First"));
    }

    #[test]
    fn test_extract_ignores_turns_after_listing_without_markup() {
        // Follow-up chatter after the listing does not hide it.
        let snapshot = ListingSnapshot::extract(&transcript_with_listing());
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_extract_empty_transcript() {
        let snapshot = ListingSnapshot::extract(&Transcript::new());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.get(1), None);
        assert_eq!(snapshot.last(), None);
    }

    #[test]
    fn test_extract_no_listing_markup() {
        let t = Transcript::from_turns(vec![
            Turn::user("hello"),
            Turn::assistant("Hi! How can I help you find a home today?"),
        ]);
        assert!(ListingSnapshot::extract(&t).is_empty());
    }

    #[test]
    fn test_last_is_highest_position() {
        let snapshot = ListingSnapshot::extract(&transcript_with_listing());
        assert_eq!(snapshot.last(), Some("Spacious Family Home"));
    }

    #[test]
    fn test_get_missing_position() {
        let snapshot = ListingSnapshot::extract(&transcript_with_listing());
        assert_eq!(snapshot.get(5), None);
    }

    #[test]
    fn test_position_zero_ignored() {
        let t = Transcript::from_turns(vec![Turn::assistant("0. Not a real item\n1. Real Item")]);
        let snapshot = ListingSnapshot::extract(&t);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(1), Some("Real Item"));
    }

    #[test]
    fn test_indented_items_matched() {
        let t = Transcript::from_turns(vec![Turn::assistant(
            "Here you go:\n  1. Garden View Apartment\n  2. Contemporary Loft",
        )]);
        let snapshot = ListingSnapshot::extract(&t);
        assert_eq!(snapshot.get(2), Some("Contemporary Loft"));
    }

    #[test]
    fn test_decimal_numbers_in_prose_not_treated_as_listing() {
        // "3.5% mortgage rate" mid-sentence must not create a listing entry.
        let t = Transcript::from_turns(vec![Turn::assistant(
            "Rates are around 3.5% right now, which is competitive.",
        )]);
        // The line does not start with the number, so no match.
        assert!(ListingSnapshot::extract(&t).is_empty());
    }
}
