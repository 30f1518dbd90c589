//! Driving port for the read-only group directory.

use async_trait::async_trait;

use crate::domain::{Error, Group};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupsQuery: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, Error>;

    /// Look a group up by raw id. Malformed ids are reported as not found.
    async fn get_group(&self, id: &str) -> Result<Group, Error>;
}
