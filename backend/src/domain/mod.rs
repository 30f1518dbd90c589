//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed snippet, user and group entities, the
//! access rules that guard mutation, and the services behind the driving
//! ports. Nothing here knows about HTTP or storage technology.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Snippet (alias to `snippet::Snippet`) — stored code sample.
//! - Policy (alias to `permissions::Policy`) — conjunction of access rules.
//! - Requester (alias to `auth::Requester`) — who issued a request.

pub mod auth;
pub mod directory_service;
pub mod error;
pub mod field_errors;
pub mod group;
pub mod login_service;
pub mod permissions;
pub mod ports;
pub mod snippet;
pub mod snippet_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    HashedPassword, LoginCredentials, LoginValidationError, PasswordHashError, Requester,
};
pub use self::directory_service::{GroupsQueryService, UsersQueryService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::field_errors::{FieldError, FieldErrors};
pub use self::group::{GROUP_NAME_MAX, Group, GroupId, GroupValidationError};
pub use self::login_service::AccountLoginService;
pub use self::permissions::{
    AccessMethod, AccessRule, IsAuthenticatedOrReadOnly, IsOwnerOrReadOnly, Policy,
};
pub use self::snippet::{
    DEFAULT_LANGUAGE, DEFAULT_STYLE, Language, NewSnippet, Snippet, SnippetChanges, SnippetCode,
    SnippetContent, SnippetId, SnippetTitle, SnippetValidationError, Style, TITLE_MAX,
};
pub use self::snippet_service::SnippetService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
