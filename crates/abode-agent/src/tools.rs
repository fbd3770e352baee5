//! Tagged tool-call surface and its structured outcomes.
//!
//! Calls arrive as JSON with a `tool` tag; outcomes go back with an
//! `outcome` tag. Domain failures the user can act on (ambiguity,
//! conflicts, not-found) are outcomes, not errors, and carry the context
//! the dialogue engine needs to phrase a useful reply without re-querying.

use abode_core::types::{Booking, BookingId, BookingStatus, Property};
use abode_resolve::Candidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

fn default_top_k() -> usize {
    3
}

/// A structured request from the dialogue engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum ToolCall {
    /// Resolve a property reference against the catalog and transcript.
    ResolveReference { reference: String },
    /// Resolve a reference and book a viewing at the given wire date/time.
    ScheduleViewing {
        reference: String,
        date: String,
        time: String,
    },
    /// List every booking, newest viewing first.
    ListViewings,
    /// Cancel a booking by id.
    CancelViewing { booking_id: BookingId },
    /// Rank knowledge-base entries against a query.
    SearchKnowledge {
        query: String,
        #[serde(default = "default_top_k")]
        top_k: usize,
    },
    /// Filter the catalog by city and price range; all fields optional.
    SearchProperties {
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        min_price: Option<f64>,
        #[serde(default)]
        max_price: Option<f64>,
    },
}

impl ToolCall {
    /// Boundary validation, before anything touches the core.
    pub fn validate(&self) -> Result<(), AgentError> {
        match self {
            ToolCall::ResolveReference { reference } => {
                if reference.trim().is_empty() {
                    return Err(AgentError::InvalidToolCall(
                        "reference must not be empty".to_string(),
                    ));
                }
            }
            ToolCall::ScheduleViewing {
                reference,
                date,
                time,
            } => {
                if reference.trim().is_empty() {
                    return Err(AgentError::InvalidToolCall(
                        "reference must not be empty".to_string(),
                    ));
                }
                if date.trim().is_empty() || time.trim().is_empty() {
                    return Err(AgentError::InvalidToolCall(
                        "date and time must not be empty".to_string(),
                    ));
                }
            }
            ToolCall::SearchKnowledge { query, top_k } => {
                if query.trim().is_empty() {
                    return Err(AgentError::InvalidToolCall(
                        "query must not be empty".to_string(),
                    ));
                }
                if *top_k == 0 {
                    return Err(AgentError::InvalidToolCall(
                        "top_k must be at least 1".to_string(),
                    ));
                }
            }
            ToolCall::SearchProperties {
                min_price,
                max_price,
                ..
            } => {
                if let (Some(min), Some(max)) = (min_price, max_price) {
                    if min > max {
                        return Err(AgentError::InvalidToolCall(
                            "min_price must not exceed max_price".to_string(),
                        ));
                    }
                }
            }
            ToolCall::ListViewings | ToolCall::CancelViewing { .. } => {}
        }
        Ok(())
    }
}

/// A booking rendered for listing back to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewingSummary {
    pub booking_id: BookingId,
    pub property_title: String,
    /// Human-formatted viewing time, e.g. "Monday, January 12 at 06:00 PM".
    pub when: String,
    pub status: BookingStatus,
}

/// A ranked knowledge-base hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerHit {
    pub question: String,
    pub answer: String,
    pub score: f64,
}

/// The structured result of one handled tool call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// The reference resolved to exactly one property.
    Resolved { property: Property },
    /// An ordinal reference was used with no listing in the conversation.
    NoListingContext { reference: String },
    /// Several properties matched; the user must pick.
    AmbiguousReference {
        reference: String,
        candidates: Vec<Candidate>,
    },
    /// Nothing matched; suggestions are sample catalog titles.
    ReferenceNotFound {
        reference: String,
        suggestions: Vec<String>,
    },
    /// A viewing was booked.
    Scheduled {
        booking: Booking,
        property_title: String,
        /// Human-formatted viewing time for the confirmation message.
        when: String,
    },
    /// The wire date/time failed to parse.
    MalformedDateTime { input: String },
    /// The requested time is not in the future.
    PastDateTime {
        requested: DateTime<Utc>,
        now: DateTime<Utc>,
    },
    /// Another scheduled viewing sits within an hour of the request.
    TimeConflict {
        property_title: String,
        /// Human-formatted conflicting viewing times.
        conflicts: Vec<String>,
    },
    /// All bookings, newest viewing first.
    Viewings { viewings: Vec<ViewingSummary> },
    /// A booking was cancelled.
    Cancelled { booking_id: BookingId },
    /// Cancel targeted an unknown booking.
    BookingNotFound { booking_id: BookingId },
    /// Ranked knowledge-base answers, best first.
    Answers { hits: Vec<AnswerHit> },
    /// Properties matching a catalog search, in catalog order. The
    /// rendered form is the numbered listing later ordinal references
    /// resolve against.
    Listing { properties: Vec<Property> },
}
