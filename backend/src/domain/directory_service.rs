//! Read-only user and group directory services.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    GroupRepository, GroupRepositoryError, GroupsQuery, SnippetRepository,
    SnippetRepositoryError, UserPersistenceError, UserRepository, UserSummary, UsersQuery,
};
use crate::domain::{Error, Group, GroupId, User, UserId};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_snippet_error(error: SnippetRepositoryError) -> Error {
    match error {
        SnippetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("snippet repository unavailable: {message}"))
        }
        SnippetRepositoryError::Query { message } => {
            Error::internal(format!("snippet repository error: {message}"))
        }
    }
}

fn map_group_error(error: GroupRepositoryError) -> Error {
    match error {
        GroupRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("group repository unavailable: {message}"))
        }
        GroupRepositoryError::Query { message } => {
            Error::internal(format!("group repository error: {message}"))
        }
    }
}

/// Users with the ids of the snippets they own.
#[derive(Clone)]
pub struct UsersQueryService<U, S> {
    users: Arc<U>,
    snippets: Arc<S>,
}

impl<U, S> UsersQueryService<U, S> {
    pub fn new(users: Arc<U>, snippets: Arc<S>) -> Self {
        Self { users, snippets }
    }
}

impl<U, S> UsersQueryService<U, S>
where
    U: UserRepository,
    S: SnippetRepository,
{
    async fn summarise(&self, user: User) -> Result<UserSummary, Error> {
        let snippets = self
            .snippets
            .list_ids_by_owner(user.id())
            .await
            .map_err(map_snippet_error)?;
        Ok(UserSummary { user, snippets })
    }
}

#[async_trait]
impl<U, S> UsersQuery for UsersQueryService<U, S>
where
    U: UserRepository,
    S: SnippetRepository,
{
    async fn list_users(&self) -> Result<Vec<UserSummary>, Error> {
        let users = self.users.list().await.map_err(map_user_error)?;
        let mut summaries = Vec::with_capacity(users.len());
        for user in users {
            summaries.push(self.summarise(user).await?);
        }
        Ok(summaries)
    }

    async fn get_user(&self, id: &str) -> Result<UserSummary, Error> {
        let not_found = || Error::not_found(format!("user {id} not found"));
        let user_id = UserId::new(id).map_err(|_| not_found())?;
        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(not_found)?;
        self.summarise(user).await
    }
}

#[derive(Clone)]
pub struct GroupsQueryService<G> {
    groups: Arc<G>,
}

impl<G> GroupsQueryService<G> {
    pub fn new(groups: Arc<G>) -> Self {
        Self { groups }
    }
}

#[async_trait]
impl<G> GroupsQuery for GroupsQueryService<G>
where
    G: GroupRepository,
{
    async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.groups.list().await.map_err(map_group_error)
    }

    async fn get_group(&self, id: &str) -> Result<Group, Error> {
        let not_found = || Error::not_found(format!("group {id} not found"));
        let group_id = id
            .parse::<i64>()
            .ok()
            .and_then(|raw| GroupId::new(raw).ok())
            .ok_or_else(not_found)?;
        self.groups
            .find_by_id(group_id)
            .await
            .map_err(map_group_error)?
            .ok_or_else(not_found)
    }
}
