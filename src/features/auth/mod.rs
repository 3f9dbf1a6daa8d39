//! Auth feature covering login, registration, and the in-memory session. It keeps
//! authentication logic out of the views and must stay aligned with the backend
//! token contract. This module touches security boundaries and must avoid
//! logging secrets or token material.
//!
//! Flow Overview: the gateway posts credentials, receives `access_token`, and
//! writes it to the session store. Everything downstream reads the store.

pub(crate) mod client;
pub mod gateway;
pub mod state;
pub(crate) mod types;

pub use gateway::{AuthError, AuthFlow, AuthGateway};
pub use state::{Credential, SessionStore};

/// Demo operator seeded on development backends; offered as the sign-in default.
pub const DEMO_IDENTITY: &str = "admin@example.com";
pub const DEMO_SECRET: &str = "password123";
