//! Password login against stored user accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{Error, HashedPassword, LoginCredentials, UserId};

/// [`LoginService`] that checks credentials against a [`UserRepository`].
#[derive(Clone)]
pub struct AccountLoginService<U> {
    users: Arc<U>,
    // Verified against unknown usernames so both failure paths hash once.
    decoy: Option<HashedPassword>,
}

impl<U> AccountLoginService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            decoy: HashedPassword::derive("decoy")
                .inspect_err(|error| warn!(%error, "login decoy hash unavailable"))
                .ok(),
        }
    }
}

#[async_trait]
impl<U> LoginService for AccountLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .users
            .find_account(credentials.username())
            .await
            .map_err(|error| match error {
                UserPersistenceError::Connection { message } => {
                    Error::service_unavailable(format!("user repository unavailable: {message}"))
                }
                UserPersistenceError::Query { message } => {
                    Error::internal(format!("user repository error: {message}"))
                }
            })?;

        match account {
            Some(account) if account.password.verify(credentials.password()) => {
                Ok(account.user.id().clone())
            }
            Some(_) => {
                debug!(username = credentials.username(), "password mismatch");
                Err(Error::unauthorized("invalid credentials"))
            }
            None => {
                if let Some(decoy) = &self.decoy {
                    decoy.verify(credentials.password());
                }
                debug!(username = credentials.username(), "unknown username");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockUserRepository, UserAccount};
    use crate::domain::{ErrorCode, User};
    use rstest::rstest;

    const ADA: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn repository() -> MockUserRepository {
        let stored = HashedPassword::derive("lovelace").expect("hash");
        let mut users = MockUserRepository::new();
        users.expect_find_account().returning(move |username| {
            Ok((username == "ada").then(|| UserAccount {
                user: User::try_from_strings(ADA, "ada").expect("user"),
                password: stored.clone(),
            }))
        });
        users
    }

    #[rstest]
    #[case("ada", "lovelace", true)]
    #[case("ada", "babbage", false)]
    #[case("charles", "lovelace", false)]
    #[tokio::test]
    async fn authenticates_only_matching_passwords(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let service = AccountLoginService::new(Arc::new(repository()));
        let creds = LoginCredentials::try_from_parts(username, password).expect("creds");

        match (should_succeed, service.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), ADA),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::Unauthorized);
                assert_eq!(err.message(), "invalid credentials");
            }
            (_, other) => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn repository_outage_is_service_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_account()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));
        let creds = LoginCredentials::try_from_parts("ada", "x").expect("creds");

        let err = AccountLoginService::new(Arc::new(users))
            .authenticate(&creds)
            .await
            .expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
