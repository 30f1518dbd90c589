//! Port abstraction for snippet persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewSnippet, Snippet, SnippetId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by snippet repository adapters.
    pub enum SnippetRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "snippet repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "snippet repository query failed: {message}",
    }
}

/// Storage for snippets. Adapters assign ids on insert, starting at 1 and
/// never reusing a value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    /// All snippets ordered by creation time, then id.
    async fn list(&self) -> Result<Vec<Snippet>, SnippetRepositoryError>;

    async fn find_by_id(&self, id: SnippetId) -> Result<Option<Snippet>, SnippetRepositoryError>;

    /// Ids of the snippets owned by `owner`, ascending.
    async fn list_ids_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<SnippetId>, SnippetRepositoryError>;

    /// Persist a new snippet and return it with its assigned id.
    async fn insert(&self, snippet: NewSnippet) -> Result<Snippet, SnippetRepositoryError>;

    /// Overwrite an existing snippet. Returns `false` when the id is unknown.
    async fn update(&self, snippet: &Snippet) -> Result<bool, SnippetRepositoryError>;

    /// Remove a snippet. Returns `false` when the id is unknown.
    async fn delete(&self, id: SnippetId) -> Result<bool, SnippetRepositoryError>;
}
