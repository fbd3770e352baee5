//! Reference resolution for Abode.
//!
//! Turns a raw user reference ("Downtown Loft", "the second one", "2") into
//! a single catalog property, using the most recent numbered listing shown
//! in the conversation plus multi-strategy fuzzy lookup against the catalog.

pub mod error;
pub mod listing;
pub mod ordinal;
pub mod resolver;

pub use error::{Candidate, ResolveError};
pub use listing::ListingSnapshot;
pub use ordinal::{parse_ordinal, OrdinalRef};
pub use resolver::Resolver;
