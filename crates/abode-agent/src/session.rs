//! Conversation session state and lifecycle.
//!
//! Sessions are explicit handles passed by the caller; there is no process
//! global. Each session owns a rolling transcript window that ordinal
//! resolution reads from.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use abode_core::config::SessionConfig;
use abode_core::error::AbodeError;
use abode_core::types::{SessionId, Transcript, Turn};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::error::AgentError;

/// One user's conversation state.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversationSession {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
    pub transcript: Transcript,
    pub message_count: usize,
}

impl ConversationSession {
    fn new(id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            id,
            started_at: now,
            last_message_at: now,
            transcript: Transcript::new(),
            message_count: 0,
        }
    }
}

/// Persistence for conversation sessions.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: SessionId) -> Result<Option<ConversationSession>, AbodeError>;

    fn save(&self, session: ConversationSession) -> Result<(), AbodeError>;

    fn remove(&self, id: SessionId) -> Result<(), AbodeError>;
}

/// In-memory session store keyed by session id.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, ConversationSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, ConversationSession>>, AbodeError>
    {
        self.sessions
            .lock()
            .map_err(|e| AbodeError::StoreUnavailable(format!("Lock poisoned: {}", e)))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: SessionId) -> Result<Option<ConversationSession>, AbodeError> {
        let sessions = self.lock()?;
        Ok(sessions.get(&id).cloned())
    }

    fn save(&self, session: ConversationSession) -> Result<(), AbodeError> {
        let mut sessions = self.lock()?;
        sessions.insert(session.id, session);
        Ok(())
    }

    fn remove(&self, id: SessionId) -> Result<(), AbodeError> {
        let mut sessions = self.lock()?;
        sessions.remove(&id);
        Ok(())
    }
}

/// Manages session lifecycle: creation, timeout expiry, transcript window.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_config(store, SessionConfig::default())
    }

    pub fn with_config(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    /// Load the session, or start a fresh one if it is missing or has been
    /// idle past the timeout. An expired session's transcript is gone for
    /// good; ordinal references start over.
    pub fn open_or_start(&self, id: SessionId) -> Result<ConversationSession, AgentError> {
        if let Some(session) = self.store.load(id)? {
            if !self.is_expired(&session) {
                return Ok(session);
            }
            info!(session_id = %id, "Session expired; starting fresh");
            self.store.remove(id)?;
        }

        let session = ConversationSession::new(id);
        self.store.save(session.clone())?;
        debug!(session_id = %id, "Session started");
        Ok(session)
    }

    /// Whether a session has been idle past the configured timeout.
    pub fn is_expired(&self, session: &ConversationSession) -> bool {
        let timeout = Duration::minutes(i64::from(self.config.timeout_minutes));
        Utc::now() - session.last_message_at > timeout
    }

    /// Append turns from one handled exchange and persist.
    ///
    /// Bumps the message count once per exchange, refreshes the idle clock,
    /// and trims the transcript to the configured window, oldest first.
    pub fn record(
        &self,
        session: &mut ConversationSession,
        turns: Vec<Turn>,
    ) -> Result<(), AgentError> {
        for turn in turns {
            session.transcript.push(turn);
        }

        let max = self.config.max_transcript_turns;
        if session.transcript.len() > max {
            let excess = session.transcript.len() - max;
            let trimmed = session.transcript.turns()[excess..].to_vec();
            session.transcript = Transcript::from_turns(trimmed);
        }

        session.last_message_at = Utc::now();
        session.message_count += 1;
        self.store.save(session.clone())?;
        Ok(())
    }
}
