//! Ordinal/cardinal reference normalization.
//!
//! Maps a closed vocabulary of position words ("first".."tenth", "1".."10",
//! "1st".."10th", "last") to a listing position. Anything outside the
//! vocabulary is not an ordinal reference and falls through to title
//! matching.

/// A normalized positional reference into a listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrdinalRef {
    /// 1-based listing position (1..=10).
    Position(u32),
    /// The final listing entry, whatever its position.
    Last,
}

const ORDINAL_WORDS: &[(&str, u32)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("1st", 1),
    ("2nd", 2),
    ("3rd", 3),
    ("4th", 4),
    ("5th", 5),
    ("6th", 6),
    ("7th", 7),
    ("8th", 8),
    ("9th", 9),
    ("10th", 10),
];

/// Parse a raw reference as an ordinal, if it is one.
///
/// Case-insensitive and trimmed. Conversational wrappers the dialogue
/// engine tends to leave in place ("the second one") are stripped before
/// matching, so "the second one", "second", and "2" all normalize to
/// position 2.
pub fn parse_ordinal(raw: &str) -> Option<OrdinalRef> {
    let mut s = raw.trim().to_lowercase();

    // Strip conversational wrappers: "the <ordinal> one/property/listing".
    if let Some(rest) = s.strip_prefix("the ") {
        s = rest.to_string();
    }
    for suffix in [" one", " property", " listing"] {
        if let Some(rest) = s.strip_suffix(suffix) {
            s = rest.to_string();
            break;
        }
    }
    let s = s.trim();

    if s == "last" {
        return Some(OrdinalRef::Last);
    }

    if let Ok(n) = s.parse::<u32>() {
        if (1..=10).contains(&n) {
            return Some(OrdinalRef::Position(n));
        }
        return None;
    }

    ORDINAL_WORDS
        .iter()
        .find(|(word, _)| *word == s)
        .map(|(_, n)| OrdinalRef::Position(*n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_words() {
        assert_eq!(parse_ordinal("first"), Some(OrdinalRef::Position(1)));
        assert_eq!(parse_ordinal("second"), Some(OrdinalRef::Position(2)));
        assert_eq!(parse_ordinal("tenth"), Some(OrdinalRef::Position(10)));
    }

    #[test]
    fn test_digits() {
        assert_eq!(parse_ordinal("1"), Some(OrdinalRef::Position(1)));
        assert_eq!(parse_ordinal("10"), Some(OrdinalRef::Position(10)));
    }

    #[test]
    fn test_digits_out_of_range() {
        assert_eq!(parse_ordinal("0"), None);
        assert_eq!(parse_ordinal("11"), None);
        assert_eq!(parse_ordinal("99"), None);
    }

    #[test]
    fn test_suffixed_digits() {
        assert_eq!(parse_ordinal("2nd"), Some(OrdinalRef::Position(2)));
        assert_eq!(parse_ordinal("3rd"), Some(OrdinalRef::Position(3)));
        assert_eq!(parse_ordinal("10th"), Some(OrdinalRef::Position(10)));
    }

    #[test]
    fn test_last() {
        assert_eq!(parse_ordinal("last"), Some(OrdinalRef::Last));
        assert_eq!(parse_ordinal("the last one"), Some(OrdinalRef::Last));
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        assert_eq!(parse_ordinal("  SECOND  "), Some(OrdinalRef::Position(2)));
        assert_eq!(parse_ordinal("First"), Some(OrdinalRef::Position(1)));
    }

    #[test]
    fn test_conversational_wrappers() {
        assert_eq!(parse_ordinal("the second one"), Some(OrdinalRef::Position(2)));
        assert_eq!(parse_ordinal("the third property"), Some(OrdinalRef::Position(3)));
        assert_eq!(parse_ordinal("the first listing"), Some(OrdinalRef::Position(1)));
    }

    #[test]
    fn test_non_ordinals_rejected() {
        assert_eq!(parse_ordinal("Downtown Loft"), None);
        assert_eq!(parse_ordinal("eleventh"), None);
        assert_eq!(parse_ordinal(""), None);
        assert_eq!(parse_ordinal("the"), None);
    }

    #[test]
    fn test_title_containing_ordinal_word_not_an_ordinal() {
        // Multi-word non-wrapper phrases are not in the closed vocabulary.
        assert_eq!(parse_ordinal("first street loft"), None);
    }
}
