//! HTTP helpers for the backend API with consistent timeouts and error handling.
//! Feature clients use these helpers to avoid duplicating request setup and to
//! enforce a predictable timeout policy. The helpers never store tokens; bearer
//! credentials are passed in per call and attached as headers.

use super::{config::AppConfig, errors::AppError};
use reqwest::{multipart::Form, Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, field, instrument, Span};
use ulid::Ulid;
use url::Url;

pub(crate) static APP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Shared HTTP client bound to one backend origin.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds the client with the configured timeout and user agent.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Posts a form-encoded body and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failures, non-2xx responses, or undecodable bodies.
    #[instrument(skip(self, body), fields(request_id = field::Empty))]
    pub async fn post_form_response<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path)?;
        let response = self.send(self.http.post(url).form(body)).await?;

        handle_json_response(response).await
    }

    /// Posts a JSON body and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failures, non-2xx responses, or undecodable bodies.
    #[instrument(skip(self, body), fields(request_id = field::Empty))]
    pub async fn post_json_response<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path)?;
        let response = self.send(self.http.post(url).json(body)).await?;

        handle_json_response(response).await
    }

    /// Fetches JSON with a bearer token, appending `query` pairs when present.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failures, non-2xx responses, or undecodable bodies.
    #[instrument(skip(self, bearer), fields(request_id = field::Empty))]
    pub async fn get_json_with_bearer<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: &SecretString,
    ) -> Result<T, AppError> {
        let url = self.build_url(path)?;
        let mut builder = self.http.get(url).bearer_auth(bearer.expose_secret());
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let response = self.send(builder).await?;

        handle_json_response(response).await
    }

    /// Posts a multipart form with a bearer token and expects no meaningful body.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failures or non-2xx responses.
    #[instrument(skip(self, form, bearer), fields(request_id = field::Empty))]
    pub async fn post_multipart_with_bearer(
        &self,
        path: &str,
        form: Form,
        bearer: &SecretString,
    ) -> Result<(), AppError> {
        let url = self.build_url(path)?;
        let builder = self
            .http
            .post(url)
            .bearer_auth(bearer.expose_secret())
            .multipart(form);
        let response = self.send(builder).await?;

        handle_empty_response(response).await
    }

    /// Resolves `path` against the configured base URL.
    fn build_url(&self, path: &str) -> Result<Url, AppError> {
        let raw = build_url_with_base(&self.base_url, path);
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config(format!(
                "No backend URL configured; same-origin path {raw} has no hosting origin."
            )));
        }

        Url::parse(&raw)
            .map_err(|err| AppError::Config(format!("Invalid backend URL {raw}: {err}")))
    }

    /// Tags the request with a fresh correlation id and sends it.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let request_id = Ulid::new().to_string();
        Span::current().record("request_id", request_id.as_str());

        let response = builder
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await
            .map_err(map_request_error)?;

        debug!(status = response.status().as_u16(), "backend responded");

        Ok(response)
    }
}

/// Builds a URL string from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                map_request_error(err)
            } else {
                AppError::Parse(format!("Failed to decode response: {err}"))
            }
        })
    } else {
        Err(http_error(response).await)
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: sanitize_body(&body),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{build_url_with_base, sanitize_body, ApiClient, REQUEST_ID_HEADER};
    use crate::client::{config::AppConfig, errors::AppError};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("https://api.example.com/", "/visitors"),
            "https://api.example.com/visitors"
        );
        assert_eq!(
            build_url_with_base("https://api.example.com/v1", "auth/login"),
            "https://api.example.com/v1/auth/login"
        );
        assert_eq!(build_url_with_base("  ", "/visitors"), "/visitors");
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        assert_eq!(sanitize_body("  nope \n"), "nope");
        assert_eq!(sanitize_body(&"x".repeat(500)).len(), 200);
    }

    #[tokio::test]
    async fn same_origin_requests_fail_without_io() {
        let client = ApiClient::new(&AppConfig::default()).unwrap();
        let err = client
            .post_json_response::<_, Value>("/auth/register", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn get_json_attaches_bearer_query_and_request_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/visitors"))
            .and(query_param("q", "jane"))
            .and(header("Authorization", "Bearer tok-1"))
            .and(header_exists(REQUEST_ID_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        let body: Value = client
            .get_json_with_bearer(
                "/visitors",
                &[("q", "jane")],
                &SecretString::from("tok-1".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(body, json!({ "items": [] }));
    }

    #[tokio::test]
    async fn non_success_maps_to_http_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string(" bad credentials "))
            .mount(&server)
            .await;

        let client = ApiClient::new(&AppConfig::with_base_url(&server.uri())).unwrap();
        let err = client
            .post_form_response::<_, Value>("/auth/login", &[("username", "a")])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::Http {
                status: 401,
                message: "bad credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn slow_backend_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": "late" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = AppConfig {
            api_base_url: server.uri(),
            request_timeout: Duration::from_millis(50),
        };
        let client = ApiClient::new(&config).unwrap();
        let err = client
            .post_json_response::<_, Value>("/auth/register", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
    }
}
