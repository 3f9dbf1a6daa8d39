//! Sign-in gateway. Performs login and registration exchanges and writes the
//! resulting credential to the shared [`SessionStore`]. Failures collapse into a
//! generic [`AuthError`]; wrong passwords and server outages look the same to
//! the operator, while the transport cause is kept for logs.

use crate::{
    client::{ApiClient, AppError},
    features::auth::{
        client,
        state::{Credential, SessionStore},
        types::TokenResponse,
    },
};
use secrecy::SecretString;
use std::{
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tracing::{info, instrument, warn};

/// Which exchange produced an [`AuthError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Register,
}

/// User-visible sign-in failure.
#[derive(Clone, Debug)]
pub struct AuthError {
    flow: AuthFlow,
    cause: AppError,
}

impl AuthError {
    #[must_use]
    pub fn flow(&self) -> AuthFlow {
        self.flow
    }

    /// Underlying transport error; never shown to the operator.
    #[must_use]
    pub fn cause(&self) -> &AppError {
        &self.cause
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flow {
            AuthFlow::Login => formatter.write_str("Login failed"),
            AuthFlow::Register => formatter.write_str("Register failed"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Login/registration front for one session.
#[derive(Clone, Debug)]
pub struct AuthGateway {
    api: ApiClient,
    session: SessionStore,
    in_flight: Arc<AtomicUsize>,
}

impl AuthGateway {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self {
            api,
            session,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// True while any login or registration request is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Exchanges credentials at `/auth/login` and stores the returned token.
    ///
    /// # Errors
    /// Returns [`AuthError`] for any non-2xx response or transport failure.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<Credential, AuthError> {
        let _loading = LoadingGuard::acquire(&self.in_flight);
        let result = client::login(&self.api, identity, secret).await;
        self.finish(AuthFlow::Login, result)
    }

    /// Registers at `/auth/register` and stores the returned token.
    ///
    /// # Errors
    /// Returns [`AuthError`] for any non-2xx response or transport failure.
    #[instrument(skip_all)]
    pub async fn register(
        &self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<Credential, AuthError> {
        let _loading = LoadingGuard::acquire(&self.in_flight);
        let result = client::register(&self.api, identity, secret).await;
        self.finish(AuthFlow::Register, result)
    }

    fn finish(
        &self,
        flow: AuthFlow,
        result: Result<TokenResponse, AppError>,
    ) -> Result<Credential, AuthError> {
        let token = result.and_then(|response| {
            if response.access_token.trim().is_empty() {
                Err(AppError::Parse(
                    "Response did not include an access token.".to_string(),
                ))
            } else {
                Ok(response.access_token)
            }
        });

        match token {
            Ok(token) => {
                let credential = Credential::new(token);
                self.session.set(credential.clone());
                info!(?flow, "session established");
                Ok(credential)
            }
            Err(cause) => {
                warn!(?flow, error = %cause, "sign-in failed");
                Err(AuthError { flow, cause })
            }
        }
    }
}

/// Keeps the loading counter raised until dropped, whatever the outcome.
struct LoadingGuard(Arc<AtomicUsize>);

impl LoadingGuard {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
