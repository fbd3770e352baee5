//! Shared types, errors, and configuration for the Abode core.
//!
//! Abode is the conversational core of a real-estate viewing assistant:
//! reference resolution against a transcript, conflict-aware viewing
//! scheduling, and semantic FAQ ranking. This crate holds the domain
//! types those subsystems share, the top-level error enum, and the TOML
//! configuration layer.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::AbodeConfig;
pub use error::{AbodeError, Result};
pub use types::*;
