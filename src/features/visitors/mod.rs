//! Visitor feature: listing, filtering, and creating visitor records for the
//! signed-in operator. Requests always carry the session's bearer token.

pub(crate) mod client;
pub mod repository;
pub mod types;

pub use repository::{VisitorError, VisitorRepository};
pub use types::{DraftVisitor, VisitorRecord};
