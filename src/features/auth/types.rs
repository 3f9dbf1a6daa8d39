//! Request and response types for sign-in calls. These payloads carry passwords
//! and tokens, so they deliberately do not implement `Debug`.

use serde::{Deserialize, Serialize};

/// Form fields for `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// JSON body for `POST /auth/register`.
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}
