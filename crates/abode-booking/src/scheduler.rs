//! Viewing scheduling with a per-property conflict window.

use std::sync::Arc;

use abode_core::config::SchedulerConfig;
use abode_core::types::{Booking, BookingId, BookingStatus, PropertyId};
use abode_catalog::CatalogStore;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::BookingError;
use crate::store::BookingStore;

/// A booking annotated with its property's display title, for listings.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BookingView {
    pub booking: Booking,
    pub property_title: String,
}

/// Schedules, lists, and cancels viewings.
pub struct Scheduler {
    catalog: Arc<dyn CatalogStore>,
    store: Arc<dyn BookingStore>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(catalog: Arc<dyn CatalogStore>, store: Arc<dyn BookingStore>) -> Self {
        Self::with_config(catalog, store, SchedulerConfig::default())
    }

    pub fn with_config(
        catalog: Arc<dyn CatalogStore>,
        store: Arc<dyn BookingStore>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            config,
        }
    }

    /// Schedule a viewing of a property at the given time.
    ///
    /// The time must be in the future, and no other scheduled viewing of
    /// the same property may fall within the configured gap on either side
    /// of it (window inclusive at both ends).
    pub fn schedule(
        &self,
        property_id: PropertyId,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Booking, BookingError> {
        let property = self
            .catalog
            .find_by_id(property_id)?
            .ok_or(BookingError::PropertyNotFound { property_id })?;

        let now = Utc::now();
        if scheduled_at <= now {
            debug!(%property_id, %scheduled_at, "Rejected viewing in the past");
            return Err(BookingError::PastDateTime {
                requested: scheduled_at,
                now,
            });
        }

        let gap = Duration::minutes(i64::from(self.config.min_gap_minutes));
        let booking = Booking {
            id: BookingId::new(),
            property_id,
            scheduled_at,
            status: BookingStatus::Scheduled,
            created_at: now,
        };

        let conflicts = self.store.insert_if_no_conflict(
            booking.clone(),
            scheduled_at - gap,
            scheduled_at + gap,
        )?;
        if !conflicts.is_empty() {
            debug!(
                title = %property.title,
                count = conflicts.len(),
                "Rejected conflicting viewing"
            );
            return Err(BookingError::TimeConflict {
                property_title: property.title,
                conflicts,
            });
        }

        info!(
            booking_id = %booking.id,
            title = %property.title,
            %scheduled_at,
            "Viewing scheduled"
        );
        Ok(booking)
    }

    /// All bookings, newest viewing first, annotated with property titles.
    ///
    /// Single-tenant: every booking belongs to the one user of the session,
    /// so no ownership filter applies.
    pub fn list(&self) -> Result<Vec<BookingView>, BookingError> {
        let mut bookings = self.store.list_all()?;
        bookings.sort_by(|a, b| b.scheduled_at.cmp(&a.scheduled_at));

        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let property_title = self
                .catalog
                .find_by_id(booking.property_id)?
                .map(|p| p.title)
                .unwrap_or_else(|| "(unknown property)".to_string());
            views.push(BookingView {
                booking,
                property_title,
            });
        }
        Ok(views)
    }

    /// Cancel a booking. Cancelled bookings stop counting as conflicts.
    pub fn cancel(&self, booking_id: BookingId) -> Result<(), BookingError> {
        if !self.store.update_status(booking_id, BookingStatus::Cancelled)? {
            return Err(BookingError::BookingNotFound { booking_id });
        }
        info!(%booking_id, "Viewing cancelled");
        Ok(())
    }
}
