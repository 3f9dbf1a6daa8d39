//! In-memory session state. The store holds at most one bearer credential and
//! is the single source of truth for "is the operator authenticated". Nothing
//! is persisted; the credential lives as long as the process.

use secrecy::{ExposeSecret, SecretString};
use std::{fmt, sync::Arc};
use tokio::sync::watch;

/// Opaque bearer token returned by the backend after login or registration.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(SecretString::from(token))
    }

    /// Secret form used when attaching the `Authorization` header.
    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.0
    }

    /// Compares the token without exposing it in logs.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.0.expose_secret() == token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Credential([REDACTED])")
    }
}

/// Shared handle to the session. Clones observe and mutate the same slot.
#[derive(Clone)]
pub struct SessionStore {
    slot: Arc<watch::Sender<Option<Credential>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Replaces the current credential and notifies subscribers.
    pub fn set(&self, credential: Credential) {
        self.slot.send_replace(Some(credential));
    }

    #[must_use]
    pub fn get(&self) -> Option<Credential> {
        self.slot.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Receiver that wakes whenever `set` is called.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Credential>> {
        self.slot.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
