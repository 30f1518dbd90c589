//! Driving port for the read-only user directory.
//!
//! Inbound adapters use this port to list users alongside the snippets they
//! own without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, SnippetId, User};

/// A user and the ids of the snippets they own, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub user: User,
    pub snippets: Vec<SnippetId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error>;

    /// Look a user up by raw id. Malformed ids are reported as not found.
    async fn get_user(&self, id: &str) -> Result<UserSummary, Error>;
}
