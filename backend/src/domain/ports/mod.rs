//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod group_repository;
mod groups_query;
mod highlighter;
mod login_service;
mod snippet_command;
mod snippet_query;
mod snippet_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::{GroupRepository, GroupRepositoryError};
#[cfg(test)]
pub use groups_query::MockGroupsQuery;
pub use groups_query::GroupsQuery;
#[cfg(test)]
pub use highlighter::MockHighlighter;
pub use highlighter::{FixtureHighlighter, HighlightError, Highlighter, escape_html};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use snippet_command::MockSnippetCommand;
pub use snippet_command::{
    CreateSnippetRequest, DeleteSnippetRequest, SnippetCommand, SnippetDetails, SnippetPayload,
    UpdateSnippetRequest,
};
#[cfg(test)]
pub use snippet_query::MockSnippetQuery;
pub use snippet_query::SnippetQuery;
#[cfg(test)]
pub use snippet_repository::MockSnippetRepository;
pub use snippet_repository::{SnippetRepository, SnippetRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserAccount, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{UserSummary, UsersQuery};
