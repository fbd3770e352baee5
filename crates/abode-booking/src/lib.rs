//! Conflict-aware viewing scheduler for Abode.
//!
//! Parses wire-format date/times, enforces a minimum gap between scheduled
//! viewings of the same property, and tracks booking lifecycle
//! (scheduled, completed, cancelled).

pub mod error;
pub mod scheduler;
pub mod store;
pub mod wire;

pub use error::BookingError;
pub use scheduler::{BookingView, Scheduler};
pub use store::{BookingStore, InMemoryBookingStore};
pub use wire::parse_viewing_datetime;
