//! Driving port for snippet reads. Reads are open to every requester.

use async_trait::async_trait;

use super::SnippetDetails;
use crate::domain::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetQuery: Send + Sync {
    /// Every snippet ordered by creation time, then id.
    async fn list(&self) -> Result<Vec<SnippetDetails>, Error>;

    /// A single snippet by raw id. Malformed ids are reported as not found.
    async fn retrieve(&self, id: &str) -> Result<SnippetDetails, Error>;

    /// The stored highlighted HTML document of a snippet.
    async fn highlight(&self, id: &str) -> Result<String, Error>;
}
