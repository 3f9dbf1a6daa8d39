//! Application controller. Owns the session store, the sign-in gateway, and the
//! visitors view once a credential appears. It watches the store and mounts the
//! visitors view on the first absent-to-present transition, running the initial
//! unfiltered listing exactly once.

use crate::{
    client::{ApiClient, AppConfig, AppError},
    features::{
        auth::{AuthError, AuthGateway, Credential, SessionStore},
        visitors::{VisitorError, VisitorRepository},
    },
    views::{render_sign_in, render_visitors, Screen, SignInState},
};
use secrecy::SecretString;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub struct App {
    api: ApiClient,
    session: SessionStore,
    gateway: AuthGateway,
    changes: watch::Receiver<Option<Credential>>,
    scope: CancellationToken,
    visitors: Option<VisitorRepository>,
    auth_error: Option<String>,
    visitor_error: Option<String>,
}

impl App {
    /// Builds the client stack with an empty session.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(config)?;
        let session = SessionStore::new();
        let changes = session.subscribe();
        let gateway = AuthGateway::new(api.clone(), session.clone());

        Ok(Self {
            api,
            session,
            gateway,
            changes,
            scope: CancellationToken::new(),
            visitors: None,
            auth_error: None,
            visitor_error: None,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        Screen::compose(&self.session)
    }

    #[must_use]
    pub fn visitors(&self) -> Option<&VisitorRepository> {
        self.visitors.as_ref()
    }

    pub fn visitors_mut(&mut self) -> Option<&mut VisitorRepository> {
        self.visitors.as_mut()
    }

    #[must_use]
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    #[must_use]
    pub fn visitor_error(&self) -> Option<&str> {
        self.visitor_error.as_deref()
    }

    /// Logs in and, on success, mounts the visitors view.
    ///
    /// # Errors
    /// Returns the gateway's [`AuthError`]; its message is kept for the sign-in surface.
    pub async fn login(&mut self, identity: &str, secret: &SecretString) -> Result<(), AuthError> {
        let result = self.gateway.login(identity, secret).await;
        self.after_sign_in(result).await
    }

    /// Registers and, on success, mounts the visitors view.
    ///
    /// # Errors
    /// Returns the gateway's [`AuthError`]; its message is kept for the sign-in surface.
    pub async fn register(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), AuthError> {
        let result = self.gateway.register(identity, secret).await;
        self.after_sign_in(result).await
    }

    async fn after_sign_in(
        &mut self,
        result: Result<Credential, AuthError>,
    ) -> Result<(), AuthError> {
        match result {
            Ok(_) => {
                self.auth_error = None;
                self.sync().await;
                Ok(())
            }
            Err(err) => {
                self.auth_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies pending session changes. Returns `true` when this call mounted
    /// the visitors view and ran the initial listing.
    pub async fn sync(&mut self) -> bool {
        if !self.changes.has_changed().unwrap_or(false) {
            return false;
        }
        let present = self.changes.borrow_and_update().is_some();
        if !present || self.visitors.is_some() {
            debug!(present, "session change needs no remount");
            return false;
        }

        info!("session established, loading visitors");
        let repository = self.visitors.insert(VisitorRepository::new(
            self.api.clone(),
            self.session.clone(),
            self.scope.child_token(),
        ));
        let outcome = repository.search("").await.map(|_| ());
        if let Err(err) = self.record(outcome) {
            warn!(error = %err, "initial visitor listing failed");
        }

        true
    }

    /// Searches through the mounted view, keeping the error for rendering.
    ///
    /// # Errors
    /// Returns `Unauthenticated` before sign-in, otherwise the repository's error.
    pub async fn search(&mut self, query: &str) -> Result<(), VisitorError> {
        let repository = self.visitors.as_mut().ok_or(VisitorError::Unauthenticated)?;
        let outcome = repository.search(query).await.map(|_| ());
        self.record(outcome)
    }

    /// Creates the mounted view's draft, keeping the error for rendering.
    ///
    /// # Errors
    /// Returns `Unauthenticated` before sign-in, otherwise the repository's error.
    pub async fn create(&mut self) -> Result<(), VisitorError> {
        let repository = self.visitors.as_mut().ok_or(VisitorError::Unauthenticated)?;
        let outcome = repository.create().await.map(|_| ());
        self.record(outcome)
    }

    fn record(&mut self, outcome: Result<(), VisitorError>) -> Result<(), VisitorError> {
        self.visitor_error = outcome.as_ref().err().map(ToString::to_string);
        outcome
    }

    /// Text of the current screen.
    #[must_use]
    pub fn render(&self) -> String {
        match (self.screen(), &self.visitors) {
            (Screen::Visitors, Some(repository)) => {
                render_visitors(repository, self.visitor_error.as_deref())
            }
            (Screen::Visitors, None) => "Visitors\nLoading...".to_string(),
            (Screen::SignIn, _) => render_sign_in(SignInState {
                loading: self.gateway.is_loading(),
                error: self.auth_error.as_deref(),
            }),
        }
    }

    /// Ends the authenticated view's scope; pending visitor requests are dropped.
    pub fn shutdown(&self) {
        self.scope.cancel();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::{client::AppConfig, features::auth::Credential, views::Screen};
    use secrecy::SecretString;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok-1" })),
            )
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn sync_without_credential_is_noop() {
        let server = backend().await;
        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();

        assert!(!app.sync().await);
        assert_eq!(app.screen(), Screen::SignIn);
        assert!(app.visitors().is_none());
    }

    #[tokio::test]
    async fn initial_listing_runs_once() {
        let server = backend().await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        app.login("admin@example.com", &SecretString::from("password123".to_string()))
            .await
            .unwrap();

        assert!(!app.sync().await);
        let _ = app.render();
        assert!(!app.sync().await);

        // A replaced token keeps the mounted view; no second initial load.
        app.session().set(Credential::new("tok-2".to_string()));
        assert!(!app.sync().await);
    }

    #[tokio::test]
    async fn externally_set_credential_mounts_view() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "_id": "1", "full_name": "Jane Doe" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        app.session().set(Credential::new("tok-1".to_string()));

        assert_eq!(app.screen(), Screen::Visitors);
        assert!(app.sync().await);
        assert_eq!(app.visitors().unwrap().items().len(), 1);
        assert!(app.render().contains("Jane Doe"));
    }

    #[tokio::test]
    async fn visitor_calls_before_sign_in_are_rejected() {
        let server = backend().await;
        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();

        assert!(app.search("x").await.is_err());
        assert!(app.create().await.is_err());
    }

    #[tokio::test]
    async fn search_errors_are_kept_for_rendering() {
        let server = backend().await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        app.login("admin@example.com", &SecretString::from("pw".to_string()))
            .await
            .unwrap();

        assert!(app.visitor_error().is_some());
        assert!(app.render().contains("[error] Search failed"));
    }

    #[tokio::test]
    async fn shutdown_cancels_visitor_requests() {
        let server = backend().await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let mut app = App::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        app.login("admin@example.com", &SecretString::from("pw".to_string()))
            .await
            .unwrap();
        app.shutdown();

        assert_eq!(
            app.search("").await.unwrap_err(),
            crate::features::visitors::VisitorError::Cancelled
        );
    }
}
