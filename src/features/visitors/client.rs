//! Client helpers for the visitor endpoints. These functions keep endpoint paths
//! and encodings centralized and assume the backend enforces authorization.

use crate::{
    client::{ApiClient, AppError},
    features::visitors::types::{DraftVisitor, VisitorListResponse, VisitorRecord},
};
use reqwest::multipart::Form;
use secrecy::SecretString;
use tracing::warn;

const VISITORS_PATH: &str = "/visitors";

/// Lists visitors, filtered by `query` when it is non-empty.
/// A success response that cannot be decoded reads as an empty list; records
/// that cannot be decoded are skipped individually.
pub async fn list_visitors(
    api: &ApiClient,
    bearer: &SecretString,
    query: &str,
) -> Result<Vec<VisitorRecord>, AppError> {
    let params: Vec<(&str, &str)> = if query.is_empty() {
        Vec::new()
    } else {
        vec![("q", query)]
    };

    match api
        .get_json_with_bearer::<VisitorListResponse>(VISITORS_PATH, &params, bearer)
        .await
    {
        Ok(response) => Ok(response.into_records()),
        Err(AppError::Parse(message)) => {
            warn!(%message, "visitor list response malformed, showing no results");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Submits a draft as multipart text fields. Empty fields are still sent.
pub async fn create_visitor(
    api: &ApiClient,
    bearer: &SecretString,
    draft: &DraftVisitor,
) -> Result<(), AppError> {
    let form = Form::new()
        .text("full_name", draft.full_name.clone())
        .text("email", draft.email.clone())
        .text("phone", draft.phone.clone());

    api.post_multipart_with_bearer(VISITORS_PATH, form, bearer).await
}
