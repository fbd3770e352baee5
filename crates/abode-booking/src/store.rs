//! Booking store trait and in-memory implementation.

use std::sync::Mutex;

use abode_core::error::AbodeError;
use abode_core::types::{Booking, BookingId, BookingStatus, PropertyId};
use chrono::{DateTime, Utc};

/// Persistence for viewing bookings.
///
/// `find_in_window` and `insert_if_no_conflict` look only at bookings with
/// status `Scheduled`; completed and cancelled bookings never block a slot.
pub trait BookingStore: Send + Sync {
    fn insert(&self, booking: Booking) -> Result<(), AbodeError>;

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, AbodeError>;

    /// Scheduled bookings for a property with `scheduled_at` inside
    /// `[start, end]`, inclusive at both ends.
    fn find_in_window(
        &self,
        property_id: PropertyId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AbodeError>;

    fn list_all(&self) -> Result<Vec<Booking>, AbodeError>;

    /// Set a booking's status. Returns false if the id is unknown.
    fn update_status(&self, id: BookingId, status: BookingStatus) -> Result<bool, AbodeError>;

    /// Insert `booking` unless a scheduled booking for the same property
    /// already sits inside `[start, end]`. Returns the conflicting
    /// timestamps; empty means the insert happened.
    ///
    /// The default implementation is check-then-insert and is racy across
    /// concurrent schedulers; implementations should override it to make
    /// the check and insert atomic where the backend allows.
    fn insert_if_no_conflict(
        &self,
        booking: Booking,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AbodeError> {
        let conflicts = self.find_in_window(booking.property_id, start, end)?;
        if conflicts.is_empty() {
            self.insert(booking)?;
            return Ok(Vec::new());
        }
        Ok(conflicts.into_iter().map(|b| b.scheduled_at).collect())
    }
}

/// In-memory booking store.
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Booking>>, AbodeError> {
        self.bookings
            .lock()
            .map_err(|e| AbodeError::StoreUnavailable(format!("Lock poisoned: {}", e)))
    }
}

impl Default for InMemoryBookingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn in_window(b: &Booking, property_id: PropertyId, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    b.property_id == property_id
        && b.status == BookingStatus::Scheduled
        && b.scheduled_at >= start
        && b.scheduled_at <= end
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: Booking) -> Result<(), AbodeError> {
        let mut bookings = self.lock()?;
        bookings.push(booking);
        Ok(())
    }

    fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, AbodeError> {
        let bookings = self.lock()?;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    fn find_in_window(
        &self,
        property_id: PropertyId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AbodeError> {
        let bookings = self.lock()?;
        Ok(bookings
            .iter()
            .filter(|b| in_window(b, property_id, start, end))
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Booking>, AbodeError> {
        let bookings = self.lock()?;
        Ok(bookings.clone())
    }

    fn update_status(&self, id: BookingId, status: BookingStatus) -> Result<bool, AbodeError> {
        let mut bookings = self.lock()?;
        match bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Holds the store lock across the check and the insert, so two
    // concurrent schedulers cannot both pass the window check.
    fn insert_if_no_conflict(
        &self,
        booking: Booking,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, AbodeError> {
        let mut bookings = self.lock()?;
        let conflicts: Vec<DateTime<Utc>> = bookings
            .iter()
            .filter(|b| in_window(b, booking.property_id, start, end))
            .map(|b| b.scheduled_at)
            .collect();
        if conflicts.is_empty() {
            bookings.push(booking);
        }
        Ok(conflicts)
    }
}
