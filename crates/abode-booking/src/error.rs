//! Error types for viewing scheduling.

use abode_core::error::AbodeError;
use abode_core::types::{BookingId, PropertyId};
use chrono::{DateTime, Utc};

/// Errors from scheduling, listing, and cancelling viewings.
///
/// Conflict and past-date variants carry the timestamps the caller needs to
/// render an actionable message without another store round-trip.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// The booking targets a property id the catalog does not have.
    #[error("property {property_id} not found")]
    PropertyNotFound { property_id: PropertyId },

    /// The wire-format date or time failed to parse. Distinct from
    /// `PastDateTime`: the input never became a timestamp at all.
    #[error("malformed date/time '{input}'; expected YYYY-MM-DD and HH:MM")]
    MalformedDateTime { input: String },

    /// The requested time parsed fine but is not in the future.
    #[error("requested time {requested} is not after {now}")]
    PastDateTime {
        requested: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// A scheduled viewing of the same property already sits inside the
    /// conflict window. Carries every conflicting timestamp.
    #[error("'{property_title}' already has {} viewing(s) within an hour of the requested time", conflicts.len())]
    TimeConflict {
        property_title: String,
        conflicts: Vec<DateTime<Utc>>,
    },

    /// Cancel targeted an unknown booking id.
    #[error("booking {booking_id} not found")]
    BookingNotFound { booking_id: BookingId },

    /// Booking or catalog store failure; propagated, not retried.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl From<AbodeError> for BookingError {
    fn from(err: AbodeError) -> Self {
        BookingError::Store(err.to_string())
    }
}

impl From<BookingError> for AbodeError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Store(msg) => AbodeError::StoreUnavailable(msg),
            other => AbodeError::Booking(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_expected_format() {
        let err = BookingError::MalformedDateTime {
            input: "tomorrow at noonish".to_string(),
        };
        assert!(err.to_string().contains("YYYY-MM-DD"));
        assert!(err.to_string().contains("tomorrow at noonish"));
    }

    #[test]
    fn test_conflict_display_counts() {
        let err = BookingError::TimeConflict {
            property_title: "Beachfront Villa".to_string(),
            conflicts: vec![Utc::now(), Utc::now()],
        };
        assert!(err.to_string().contains("Beachfront Villa"));
        assert!(err.to_string().contains("2 viewing(s)"));
    }

    #[test]
    fn test_store_error_maps_to_store_unavailable() {
        let top: AbodeError = BookingError::Store("lock poisoned".to_string()).into();
        assert!(matches!(top, AbodeError::StoreUnavailable(_)));
    }

    #[test]
    fn test_domain_error_maps_to_booking_variant() {
        let top: AbodeError = BookingError::BookingNotFound {
            booking_id: BookingId::new(),
        }
        .into();
        assert!(matches!(top, AbodeError::Booking(_)));
    }
}
