//! Human rendering of tool outcomes for the session transcript.
//!
//! The dialogue engine phrases its own replies; these renderings exist so
//! the transcript records what was shown, in particular numbered viewing
//! lists that later ordinal references are interpreted against.

use chrono::{DateTime, Utc};

use crate::tools::{ToolOutcome, ViewingSummary};

/// Render a viewing time the way confirmation messages show it,
/// e.g. "Monday, January 12 at 06:00 PM".
pub fn format_viewing_time(at: DateTime<Utc>) -> String {
    at.format("%A, %B %-d at %I:%M %p").to_string()
}

/// One-line user-side description of a call, for the transcript.
pub fn describe_call(call: &crate::tools::ToolCall) -> String {
    use crate::tools::ToolCall;
    match call {
        ToolCall::ResolveReference { reference } => format!("which one is {}?", reference),
        ToolCall::ScheduleViewing {
            reference,
            date,
            time,
        } => format!("book a viewing of {} on {} at {}", reference, date, time),
        ToolCall::ListViewings => "show my viewings".to_string(),
        ToolCall::CancelViewing { booking_id } => format!("cancel viewing {}", booking_id),
        ToolCall::SearchKnowledge { query, .. } => query.clone(),
        ToolCall::SearchProperties { city, .. } => match city {
            Some(city) => format!("show me properties in {}", city),
            None => "show me properties".to_string(),
        },
    }
}

/// Assistant-side rendering of an outcome, for the transcript.
pub fn render_outcome(outcome: &ToolOutcome) -> String {
    match outcome {
        ToolOutcome::Resolved { property } => {
            format!("Found '{}' in {}.", property.title, property.city)
        }
        ToolOutcome::NoListingContext { reference } => format!(
            "I don't have a list to pick '{}' from. Search for properties first.",
            reference
        ),
        ToolOutcome::AmbiguousReference {
            reference,
            candidates,
        } => {
            let mut out = format!("A few properties match '{}':\n", reference);
            for candidate in candidates {
                out.push_str(&format!("- {}\n", candidate));
            }
            out.push_str("Which one did you mean?");
            out
        }
        ToolOutcome::ReferenceNotFound {
            reference,
            suggestions,
        } => {
            let mut out = format!("I couldn't find a property matching '{}'.", reference);
            if !suggestions.is_empty() {
                out.push_str(" Some of our listings:\n");
                for title in suggestions {
                    out.push_str(&format!("- {}\n", title));
                }
            }
            out
        }
        ToolOutcome::Scheduled {
            property_title,
            when,
            ..
        } => format!(
            "Your viewing of '{}' is confirmed for {}.",
            property_title, when
        ),
        ToolOutcome::MalformedDateTime { input } => format!(
            "I couldn't read '{}' as a date and time. Please use YYYY-MM-DD and HH:MM.",
            input
        ),
        ToolOutcome::PastDateTime { .. } => {
            "That time has already passed. Please pick a future date and time.".to_string()
        }
        ToolOutcome::TimeConflict {
            property_title,
            conflicts,
        } => {
            let mut out = format!(
                "'{}' already has a viewing booked near that time:\n",
                property_title
            );
            for when in conflicts {
                out.push_str(&format!("- {}\n", when));
            }
            out.push_str("Viewings need at least an hour between them. Please pick another slot.");
            out
        }
        ToolOutcome::Viewings { viewings } => {
            if viewings.is_empty() {
                return "You have no viewings booked.".to_string();
            }
            let mut out = format!("Your viewings ({}):\n", viewings.len());
            for (i, viewing) in viewings.iter().enumerate() {
                out.push_str(&render_viewing_item(i + 1, viewing));
            }
            out
        }
        ToolOutcome::Cancelled { .. } => "Your viewing has been cancelled.".to_string(),
        ToolOutcome::BookingNotFound { booking_id } => {
            format!("I couldn't find a booking with id {}.", booking_id)
        }
        ToolOutcome::Answers { hits } => {
            if hits.is_empty() {
                return "I don't have anything on that in the knowledge base.".to_string();
            }
            let mut out = String::new();
            for hit in hits {
                out.push_str(&format!("Q: {}\nA: {}\n", hit.question, hit.answer));
            }
            out
        }
        ToolOutcome::Listing { properties } => {
            if properties.is_empty() {
                return "No properties match that search.".to_string();
            }
            let mut out = format!("Found {} properties:\n", properties.len());
            for (i, property) in properties.iter().enumerate() {
                out.push_str(&format!(
                    "**{}. {}**\n   {}, ${:.0}\n",
                    i + 1,
                    property.title,
                    property.city,
                    property.price
                ));
            }
            out
        }
    }
}

// Numbered with a bold title line, the same shape property listings use,
// so ordinal references can point at a viewing's property.
fn render_viewing_item(position: usize, viewing: &ViewingSummary) -> String {
    format!(
        "**{}. {}**\n   {} ({})\n",
        position, viewing.property_title, viewing.when, viewing.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use abode_core::types::{BookingId, BookingStatus};
    use chrono::TimeZone;

    #[test]
    fn test_format_viewing_time() {
        let at = Utc.with_ymd_and_hms(2026, 1, 12, 18, 0, 0).unwrap();
        assert_eq!(format_viewing_time(at), "Monday, January 12 at 06:00 PM");
    }

    #[test]
    fn test_format_viewing_time_morning_single_digit_day() {
        let at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 30, 0).unwrap();
        assert_eq!(format_viewing_time(at), "Thursday, March 5 at 09:30 AM");
    }

    #[test]
    fn test_viewings_render_as_numbered_listing() {
        let outcome = ToolOutcome::Viewings {
            viewings: vec![
                ViewingSummary {
                    booking_id: BookingId::new(),
                    property_title: "Beachfront Villa".to_string(),
                    when: "Monday, January 12 at 06:00 PM".to_string(),
                    status: BookingStatus::Scheduled,
                },
                ViewingSummary {
                    booking_id: BookingId::new(),
                    property_title: "Executive Penthouse".to_string(),
                    when: "Tuesday, January 13 at 10:00 AM".to_string(),
                    status: BookingStatus::Cancelled,
                },
            ],
        };
        let text = render_outcome(&outcome);
        assert!(text.contains("**1. Beachfront Villa**"));
        assert!(text.contains("**2. Executive Penthouse**"));
        assert!(text.contains("(cancelled)"));
    }

    #[test]
    fn test_listing_renders_numbered_titles() {
        use abode_core::types::{Property, PropertyId};

        let make = |title: &str, city: &str, price: f64| Property {
            id: PropertyId::new(),
            title: title.to_string(),
            description: None,
            city: city.to_string(),
            price,
            size_sqft: None,
            created_at: Utc::now(),
        };
        let outcome = ToolOutcome::Listing {
            properties: vec![
                make("Luxury Downtown Apartment", "New York", 850_000.0),
                make("Executive Penthouse", "New York", 1_250_000.0),
            ],
        };
        let text = render_outcome(&outcome);
        assert!(text.contains("**1. Luxury Downtown Apartment**"));
        assert!(text.contains("**2. Executive Penthouse**"));
        assert!(text.contains("New York, $850000"));
    }

    #[test]
    fn test_empty_listing_message() {
        let text = render_outcome(&ToolOutcome::Listing { properties: vec![] });
        assert_eq!(text, "No properties match that search.");
    }

    #[test]
    fn test_empty_viewings_message() {
        let text = render_outcome(&ToolOutcome::Viewings { viewings: vec![] });
        assert_eq!(text, "You have no viewings booked.");
    }

    #[test]
    fn test_conflict_rendering_lists_times() {
        let outcome = ToolOutcome::TimeConflict {
            property_title: "Modern City Condo".to_string(),
            conflicts: vec!["Monday, January 12 at 06:00 PM".to_string()],
        };
        let text = render_outcome(&outcome);
        assert!(text.contains("Modern City Condo"));
        assert!(text.contains("- Monday, January 12 at 06:00 PM"));
        assert!(text.contains("another slot"));
    }
}
