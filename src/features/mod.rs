//! Domain-level features (auth, visitors) and their shared logic. Views import
//! these modules to stay focused on rendering while network and session
//! handling live in dedicated feature areas.

pub mod auth;
pub mod visitors;
