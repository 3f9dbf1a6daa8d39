//! Client wrappers for the sign-in endpoints. These helpers centralize paths and
//! encodings so the gateway never builds requests by hand.

use crate::{
    client::{ApiClient, AppError},
    features::auth::types::{LoginForm, RegisterRequest, TokenResponse},
};
use secrecy::{ExposeSecret, SecretString};

/// Exchanges form-encoded credentials for an access token.
/// Must never log the password.
pub async fn login(
    api: &ApiClient,
    username: &str,
    password: &SecretString,
) -> Result<TokenResponse, AppError> {
    let form = LoginForm {
        username,
        password: password.expose_secret(),
    };
    api.post_form_response("/auth/login", &form).await
}

/// Registers a new operator and returns their first access token.
/// Must never log the password.
pub async fn register(
    api: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<TokenResponse, AppError> {
    let request = RegisterRequest {
        email,
        password: password.expose_secret(),
    };
    api.post_json_response("/auth/register", &request).await
}
