//! Driving port for snippet mutations.
//!
//! Every request names its requester explicitly; the implementation runs the
//! access policy before looking the snippet up and again once it is loaded.

use async_trait::async_trait;

use crate::domain::{Error, Requester, Snippet, Username};

/// Unvalidated snippet fields as supplied by a client. `None` means the
/// field was omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetPayload {
    pub title: Option<String>,
    pub code: Option<String>,
    pub linenos: Option<bool>,
    pub language: Option<String>,
    pub style: Option<String>,
}

/// A snippet with its owner's username resolved for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDetails {
    pub snippet: Snippet,
    pub owner: Username,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSnippetRequest {
    pub requester: Requester,
    pub payload: SnippetPayload,
}

/// Full or partial update of an existing snippet.
///
/// `id` is the raw path segment; anything that is not a positive integer is
/// reported as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSnippetRequest {
    pub requester: Requester,
    pub id: String,
    pub payload: SnippetPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSnippetRequest {
    pub requester: Requester,
    pub id: String,
}

/// Driving port for snippet write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetCommand: Send + Sync {
    /// Create a snippet owned by the requester. Any owner supplied by the
    /// client never reaches this port.
    async fn create(&self, request: CreateSnippetRequest) -> Result<SnippetDetails, Error>;

    /// Replace the snippet content. `code` is required; other omitted fields
    /// keep their stored values.
    async fn update(&self, request: UpdateSnippetRequest) -> Result<SnippetDetails, Error>;

    /// Change only the supplied fields.
    async fn partial_update(&self, request: UpdateSnippetRequest)
    -> Result<SnippetDetails, Error>;

    async fn destroy(&self, request: DeleteSnippetRequest) -> Result<(), Error>;
}
