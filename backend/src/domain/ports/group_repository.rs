//! Port abstraction for read-only group storage.
use async_trait::async_trait;

use crate::domain::{Group, GroupId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by group repository adapters.
    pub enum GroupRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "group repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "group repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// All groups ordered by id.
    async fn list(&self) -> Result<Vec<Group>, GroupRepositoryError>;

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError>;
}
