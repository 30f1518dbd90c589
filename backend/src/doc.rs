//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the wire
//! schemas from [`crate::inbound::http::schemas`] and the two ways a request
//! may authenticate: the session cookie issued by `POST /api-auth/login/` and
//! HTTP Basic credentials.
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ApiRootResponse, ErrorCodeSchema, ErrorSchema, GroupResponse, LoginRequest, SnippetBody,
    SnippetResponse, UserResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the security schemes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api-auth/login/.",
            ))),
        );
        components.add_security_scheme(
            "BasicAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Snippets API",
        description = "Code snippets with server-side syntax highlighting. \
Reads are open to everyone; writes require an authenticated owner."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = []), ("BasicAuth" = [])),
    paths(
        crate::inbound::http::root::api_root,
        crate::inbound::http::snippets::list_snippets,
        crate::inbound::http::snippets::create_snippet,
        crate::inbound::http::snippets::retrieve_snippet,
        crate::inbound::http::snippets::update_snippet,
        crate::inbound::http::snippets::partial_update_snippet,
        crate::inbound::http::snippets::destroy_snippet,
        crate::inbound::http::snippets::highlight_snippet,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::retrieve_user,
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::retrieve_group,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiRootResponse,
        SnippetBody,
        SnippetResponse,
        UserResponse,
        GroupResponse,
        LoginRequest,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "root", description = "API entry point"),
        (name = "snippets", description = "Owned, highlighted code snippets"),
        (name = "users", description = "Read-only user directory"),
        (name = "groups", description = "Read-only groups"),
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
