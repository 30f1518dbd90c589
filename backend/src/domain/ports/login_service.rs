//! Driving port for checking a username and password.
//!
//! Both the session login endpoint and the per-request Basic credentials
//! check call this port, so they share one notion of a valid password.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Id of the user the credentials belong to; `unauthorized` when they
    /// match no account.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
