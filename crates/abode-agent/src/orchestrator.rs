//! Central coordinator wiring sessions, resolution, scheduling, and search.

use std::sync::Arc;

use abode_booking::{parse_viewing_datetime, BookingError, Scheduler};
use abode_catalog::{CatalogStore, PropertyFilters};
use abode_core::types::{Property, SessionId, Transcript, Turn};
use abode_resolve::{ResolveError, Resolver};
use abode_search::Ranker;
use tracing::debug;

use crate::error::AgentError;
use crate::format;
use crate::session::{ConversationSession, SessionManager};
use crate::tools::{AnswerHit, ToolCall, ToolOutcome, ViewingSummary};

/// Handles tool calls against one shared catalog, booking store, and
/// knowledge base, with per-session transcripts.
pub struct Orchestrator {
    sessions: SessionManager,
    catalog: Arc<dyn CatalogStore>,
    resolver: Resolver,
    scheduler: Scheduler,
    ranker: Ranker,
}

impl Orchestrator {
    pub fn new(
        sessions: SessionManager,
        catalog: Arc<dyn CatalogStore>,
        resolver: Resolver,
        scheduler: Scheduler,
        ranker: Ranker,
    ) -> Self {
        Self {
            sessions,
            catalog,
            resolver,
            scheduler,
            ranker,
        }
    }

    /// Handle one tool call within a session.
    ///
    /// Validates the call, runs it against the core, and appends the
    /// exchange to the session transcript so later ordinal references see
    /// the most recent listing.
    pub async fn handle(
        &self,
        session_id: SessionId,
        call: ToolCall,
    ) -> Result<ToolOutcome, AgentError> {
        call.validate()?;

        let mut session = self.sessions.open_or_start(session_id)?;
        let outcome = self.dispatch(&call, &session.transcript).await?;

        self.sessions.record(
            &mut session,
            vec![
                Turn::user(format::describe_call(&call)),
                Turn::assistant(format::render_outcome(&outcome)),
            ],
        )?;
        debug!(%session_id, ?call, "Handled tool call");
        Ok(outcome)
    }

    /// Record a message the dialogue engine showed the user outside any
    /// tool call, typically a numbered property listing from a search.
    /// Ordinal references resolve against the most recent such listing.
    pub fn note_assistant_message(
        &self,
        session_id: SessionId,
        text: impl Into<String>,
    ) -> Result<(), AgentError> {
        let mut session = self.sessions.open_or_start(session_id)?;
        self.sessions
            .record(&mut session, vec![Turn::assistant(text)])
    }

    /// Current state of a session, starting it if needed.
    pub fn session(&self, session_id: SessionId) -> Result<ConversationSession, AgentError> {
        self.sessions.open_or_start(session_id)
    }

    async fn dispatch(
        &self,
        call: &ToolCall,
        transcript: &Transcript,
    ) -> Result<ToolOutcome, AgentError> {
        match call {
            ToolCall::ResolveReference { reference } => {
                Ok(match self.resolve(reference, transcript)? {
                    Ok(property) => ToolOutcome::Resolved { property },
                    Err(outcome) => outcome,
                })
            }

            ToolCall::ScheduleViewing {
                reference,
                date,
                time,
            } => {
                let property = match self.resolve(reference, transcript)? {
                    Ok(property) => property,
                    Err(outcome) => return Ok(outcome),
                };

                let scheduled_at = match parse_viewing_datetime(date, time) {
                    Ok(at) => at,
                    Err(BookingError::MalformedDateTime { input }) => {
                        return Ok(ToolOutcome::MalformedDateTime { input });
                    }
                    Err(other) => return Err(AgentError::Store(other.to_string())),
                };

                match self.scheduler.schedule(property.id, scheduled_at) {
                    Ok(booking) => Ok(ToolOutcome::Scheduled {
                        when: format::format_viewing_time(booking.scheduled_at),
                        booking,
                        property_title: property.title,
                    }),
                    Err(BookingError::PastDateTime { requested, now }) => {
                        Ok(ToolOutcome::PastDateTime { requested, now })
                    }
                    Err(BookingError::TimeConflict {
                        property_title,
                        conflicts,
                    }) => Ok(ToolOutcome::TimeConflict {
                        property_title,
                        conflicts: conflicts
                            .into_iter()
                            .map(format::format_viewing_time)
                            .collect(),
                    }),
                    // The property vanished between resolution and booking.
                    Err(BookingError::PropertyNotFound { .. }) => {
                        Ok(ToolOutcome::ReferenceNotFound {
                            reference: reference.clone(),
                            suggestions: Vec::new(),
                        })
                    }
                    Err(other) => Err(AgentError::Store(other.to_string())),
                }
            }

            ToolCall::ListViewings => {
                let views = self
                    .scheduler
                    .list()
                    .map_err(|e| AgentError::Store(e.to_string()))?;
                let viewings = views
                    .into_iter()
                    .map(|v| ViewingSummary {
                        booking_id: v.booking.id,
                        property_title: v.property_title,
                        when: format::format_viewing_time(v.booking.scheduled_at),
                        status: v.booking.status,
                    })
                    .collect();
                Ok(ToolOutcome::Viewings { viewings })
            }

            ToolCall::CancelViewing { booking_id } => {
                match self.scheduler.cancel(*booking_id) {
                    Ok(()) => Ok(ToolOutcome::Cancelled {
                        booking_id: *booking_id,
                    }),
                    Err(BookingError::BookingNotFound { booking_id }) => {
                        Ok(ToolOutcome::BookingNotFound { booking_id })
                    }
                    Err(other) => Err(AgentError::Store(other.to_string())),
                }
            }

            ToolCall::SearchProperties {
                city,
                min_price,
                max_price,
            } => {
                let filters = PropertyFilters {
                    city: city.clone(),
                    min_price: *min_price,
                    max_price: *max_price,
                };
                let properties = self
                    .catalog
                    .search(&filters)
                    .map_err(|e| AgentError::Store(e.to_string()))?;
                Ok(ToolOutcome::Listing { properties })
            }

            ToolCall::SearchKnowledge { query, top_k } => {
                let ranked = self.ranker.rank(query, *top_k).await?;
                let hits = ranked
                    .into_iter()
                    .map(|r| AnswerHit {
                        question: r.entry.question,
                        answer: r.entry.answer,
                        score: r.score,
                    })
                    .collect();
                Ok(ToolOutcome::Answers { hits })
            }
        }
    }

    /// Run resolution, splitting user-actionable failures out as outcomes.
    fn resolve(
        &self,
        reference: &str,
        transcript: &Transcript,
    ) -> Result<Result<Property, ToolOutcome>, AgentError> {
        match self.resolver.resolve(reference, transcript) {
            Ok(property) => Ok(Ok(property)),
            Err(ResolveError::NoListingContext { reference }) => {
                Ok(Err(ToolOutcome::NoListingContext { reference }))
            }
            Err(ResolveError::Ambiguous {
                reference,
                candidates,
            }) => Ok(Err(ToolOutcome::AmbiguousReference {
                reference,
                candidates,
            })),
            Err(ResolveError::NotFound {
                reference,
                suggestions,
            }) => Ok(Err(ToolOutcome::ReferenceNotFound {
                reference,
                suggestions,
            })),
            Err(ResolveError::Store(msg)) => Err(AgentError::Store(msg)),
        }
    }
}
