//! Visitor repository backing the authenticated view. It owns the current result
//! set, the active search query, and the draft being edited. Reads replace the
//! result set wholesale; a successful create triggers a full re-read with the
//! query active at that moment rather than merging the new record.
//!
//! Every request races the view's cancellation scope. Once the scope is
//! cancelled, late responses are dropped without touching state.

use crate::{
    client::{ApiClient, AppError},
    features::{
        auth::{Credential, SessionStore},
        visitors::{
            client,
            types::{DraftVisitor, VisitorRecord},
        },
    },
};
use std::{fmt, future::Future};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Failures of visitor operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VisitorError {
    /// No credential in the session store; nothing was sent.
    Unauthenticated,
    /// The view's scope ended before the response was applied.
    Cancelled,
    Search(AppError),
    Create(AppError),
}

impl fmt::Display for VisitorError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitorError::Unauthenticated => formatter.write_str("Not signed in"),
            VisitorError::Cancelled => formatter.write_str("Request cancelled"),
            VisitorError::Search(err) => write!(formatter, "Search failed: {err}"),
            VisitorError::Create(err) => write!(formatter, "Create failed: {err}"),
        }
    }
}

impl std::error::Error for VisitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VisitorError::Search(err) | VisitorError::Create(err) => Some(err),
            VisitorError::Unauthenticated | VisitorError::Cancelled => None,
        }
    }
}

#[derive(Debug)]
pub struct VisitorRepository {
    api: ApiClient,
    session: SessionStore,
    scope: CancellationToken,
    items: Vec<VisitorRecord>,
    query: String,
    draft: DraftVisitor,
}

impl VisitorRepository {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore, scope: CancellationToken) -> Self {
        Self {
            api,
            session,
            scope,
            items: Vec::new(),
            query: String::new(),
            draft: DraftVisitor::default(),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[VisitorRecord] {
        &self.items
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the active query without issuing a request.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    #[must_use]
    pub fn draft(&self) -> &DraftVisitor {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftVisitor {
        &mut self.draft
    }

    pub fn set_draft(&mut self, draft: DraftVisitor) {
        self.draft = draft;
    }

    /// Cancellation scope tied to the authenticated view.
    #[must_use]
    pub fn scope(&self) -> &CancellationToken {
        &self.scope
    }

    /// Ends the scope; in-flight and future requests resolve to `Cancelled`.
    pub fn close(&self) {
        self.scope.cancel();
    }

    /// Makes `query` the active query and reloads the result set with it.
    ///
    /// # Errors
    /// See [`VisitorRepository::refresh`].
    #[instrument(skip(self))]
    pub async fn search(&mut self, query: &str) -> Result<&[VisitorRecord], VisitorError> {
        self.set_query(query);
        self.refresh().await
    }

    /// Reloads the result set with the active query, replacing it entirely.
    ///
    /// # Errors
    /// Returns `Unauthenticated` without a credential, `Cancelled` once the scope
    /// ends, or `Search` on transport and HTTP failures. The result set is left
    /// unchanged on error.
    pub async fn refresh(&mut self) -> Result<&[VisitorRecord], VisitorError> {
        let credential = self.credential()?;
        let query = self.query.clone();

        let items = guarded(
            &self.scope,
            client::list_visitors(&self.api, credential.secret(), &query),
        )
        .await?
        .map_err(VisitorError::Search)?;

        info!(count = items.len(), filtered = !query.is_empty(), "visitor list loaded");
        self.items = items;

        Ok(&self.items)
    }

    /// Submits the current draft; on success clears it and reloads with the
    /// query active now.
    ///
    /// # Errors
    /// Returns `Create` when the backend rejects the draft (the draft is kept),
    /// or any [`VisitorRepository::refresh`] error from the follow-up reload (the
    /// draft is already cleared).
    #[instrument(skip(self))]
    pub async fn create(&mut self) -> Result<&[VisitorRecord], VisitorError> {
        let credential = self.credential()?;
        let draft = self.draft.clone();

        guarded(
            &self.scope,
            client::create_visitor(&self.api, credential.secret(), &draft),
        )
        .await?
        .map_err(VisitorError::Create)?;

        info!("visitor created");
        self.draft = DraftVisitor::default();

        self.refresh().await
    }

    fn credential(&self) -> Result<Credential, VisitorError> {
        if self.scope.is_cancelled() {
            return Err(VisitorError::Cancelled);
        }
        self.session.get().ok_or(VisitorError::Unauthenticated)
    }
}

/// Runs `request` unless the scope ends first.
async fn guarded<F: Future>(
    scope: &CancellationToken,
    request: F,
) -> Result<F::Output, VisitorError> {
    tokio::select! {
        biased;
        () = scope.cancelled() => {
            debug!("visitor request abandoned, view closed");
            Err(VisitorError::Cancelled)
        }
        output = request => {
            if scope.is_cancelled() {
                Err(VisitorError::Cancelled)
            } else {
                Ok(output)
            }
        }
    }
}
