//! Shared client utilities for API access, configuration, errors, and build metadata.
//!
//! ## Backend Flows
//!
//! ### Sign-in
//!
//! 1. **Login:** form-encoded `username`/`password` POSTed to `/auth/login`.
//! 2. **Register:** JSON `email`/`password` POSTed to `/auth/register`.
//! 3. **Token:** both answer `{ "access_token": ... }`; the token is held in memory
//!    only and attached as `Authorization: Bearer` to every visitor call.
//!
//! ### Visitors
//!
//! `GET /visitors` (optional `q`) lists records; `POST /visitors` creates one from
//! multipart fields. Centralizing these helpers keeps network behavior consistent
//! and avoids duplicated logic in features. Callers must still avoid logging
//! credentials.

pub mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub(crate) mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub mod config;
pub mod errors;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use api::ApiClient;
pub use config::{AppConfig, RuntimeConfig};
pub use errors::AppError;
