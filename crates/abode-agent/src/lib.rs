//! Tool-call orchestration for Abode.
//!
//! Exposes the resolver, scheduler, and knowledge ranker behind a single
//! tagged tool-call surface, with per-session conversation transcripts so
//! ordinal references keep working across calls. The natural-language
//! dialogue loop sits above this crate; everything here is structured
//! in and structured out.

pub mod error;
pub mod format;
pub mod orchestrator;
pub mod session;
pub mod tools;

pub use error::AgentError;
pub use orchestrator::Orchestrator;
pub use session::{ConversationSession, InMemorySessionStore, SessionManager, SessionStore};
pub use tools::{AnswerHit, ToolCall, ToolOutcome, ViewingSummary};
