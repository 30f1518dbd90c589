//! Wire representations and OpenAPI schema definitions.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema` or
//! `Serialize`. Request bodies and hyperlinked responses live here, in the
//! inbound adapter layer where framework concerns belong, and the error
//! payload is registered through utoipa's external schema support.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SnippetDetails, SnippetPayload, UserSummary};
use crate::domain::{Error, Group, LoginCredentials, LoginValidationError};
use crate::inbound::http::links::{GROUP_LIST, Links, SNIPPET_LIST, USER_LIST};

/// Snippet fields accepted by create and update requests.
///
/// Unknown fields, including `owner`, `id` and `highlighted`, are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetBody {
    #[schema(example = "Hello")]
    pub title: Option<String>,
    #[schema(example = "print(\"hello\")")]
    pub code: Option<String>,
    pub linenos: Option<bool>,
    #[schema(example = "python")]
    pub language: Option<String>,
    #[schema(example = "inspired-github")]
    pub style: Option<String>,
}

impl From<SnippetBody> for SnippetPayload {
    fn from(body: SnippetBody) -> Self {
        Self {
            title: body.title,
            code: body.code,
            linenos: body.linenos,
            language: body.language,
            style: body.style,
        }
    }
}

/// Hyperlinked snippet representation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnippetResponse {
    #[schema(example = "http://localhost:8080/snippets/1/")]
    pub url: String,
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "http://localhost:8080/snippets/1/highlight/")]
    pub highlight: String,
    /// Username of the owner.
    #[schema(example = "admin")]
    pub owner: String,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub created: DateTime<Utc>,
}

impl SnippetResponse {
    pub(crate) fn build(details: &SnippetDetails, links: &Links<'_>) -> Result<Self, Error> {
        let snippet = &details.snippet;
        let content = snippet.content();
        Ok(Self {
            url: links.snippet(snippet.id())?,
            id: snippet.id().get(),
            highlight: links.highlight(snippet.id())?,
            owner: details.owner.to_string(),
            title: content.title.as_str().to_owned(),
            code: content.code.as_str().to_owned(),
            linenos: content.linenos,
            language: content.language.to_string(),
            style: content.style.to_string(),
            created: snippet.created(),
        })
    }
}

/// Read-only user representation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub url: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "admin")]
    pub username: String,
    /// URLs of the snippets this user owns, in id order.
    pub snippets: Vec<String>,
}

impl UserResponse {
    pub(crate) fn build(summary: &UserSummary, links: &Links<'_>) -> Result<Self, Error> {
        let user = &summary.user;
        Ok(Self {
            url: links.user(user.id())?,
            id: user.id().to_string(),
            username: user.username().to_string(),
            snippets: summary
                .snippets
                .iter()
                .map(|id| links.snippet(*id))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Read-only group representation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub url: String,
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "editors")]
    pub name: String,
}

impl GroupResponse {
    pub(crate) fn build(group: &Group, links: &Links<'_>) -> Result<Self, Error> {
        Ok(Self {
            url: links.group(group.id())?,
            id: group.id().get(),
            name: group.name().to_owned(),
        })
    }
}

/// Entry points of the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiRootResponse {
    #[schema(example = "http://localhost:8080/snippets/")]
    pub snippets: String,
    #[schema(example = "http://localhost:8080/users/")]
    pub users: String,
    #[schema(example = "http://localhost:8080/groups/")]
    pub groups: String,
}

impl ApiRootResponse {
    pub(crate) fn build(links: &Links<'_>) -> Result<Self, Error> {
        Ok(Self {
            snippets: links.collection(SNIPPET_LIST)?,
            users: links.collection(USER_LIST)?,
            groups: links.collection(GROUP_LIST)?,
        })
    }
}

/// Login request body for `POST /api-auth/login/`.
///
/// Example JSON:
/// `{"username":"admin","password":"password"}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the owner of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "snippet payload is invalid")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Field-level validation failures, keyed by field name.
    details: Option<serde_json::Value>,
}
