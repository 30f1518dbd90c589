//! Snippet collection, detail and highlight handlers.
//!
//! ```text
//! GET    /snippets/
//! POST   /snippets/              {"code":"print(1)","language":"python"}
//! GET    /snippets/{id}/
//! PUT    /snippets/{id}/         {"code":"print(2)"}
//! PATCH  /snippets/{id}/         {"title":"renamed"}
//! DELETE /snippets/{id}/
//! GET    /snippets/{id}/highlight/
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::domain::ports::{
    CreateSnippetRequest, DeleteSnippetRequest, SnippetPayload, UpdateSnippetRequest,
};
use crate::domain::{AccessMethod, Error, Policy, Requester};
use crate::inbound::http::links::Links;
use crate::inbound::http::schemas::{ErrorSchema, SnippetBody, SnippetResponse};
use crate::inbound::http::state::HttpState;

type BodyResult = Result<web::Json<SnippetBody>, actix_web::Error>;

/// Unwrap a parsed body, letting request-level access rules win over body
/// parse failures.
fn admit(
    method: AccessMethod,
    requester: &Requester,
    body: BodyResult,
) -> Result<SnippetPayload, actix_web::Error> {
    match body {
        Ok(body) => Ok(body.into_inner().into()),
        Err(error) => {
            Policy::snippets().check_request(method, requester)?;
            Err(error)
        }
    }
}

/// List every snippet, oldest first.
#[utoipa::path(
    get,
    path = "/snippets/",
    responses(
        (status = 200, description = "Snippets", body = [SnippetResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "listSnippets",
    security([])
)]
pub async fn list_snippets(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> Result<web::Json<Vec<SnippetResponse>>, Error> {
    let links = Links::new(&req);
    let snippets = state.snippets_query.list().await?;
    let body = snippets
        .iter()
        .map(|details| SnippetResponse::build(details, &links))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(web::Json(body))
}

/// Create a snippet owned by the requester.
#[utoipa::path(
    post,
    path = "/snippets/",
    request_body = SnippetBody,
    responses(
        (status = 201, description = "Created", body = SnippetResponse),
        (status = 400, description = "Invalid snippet", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "createSnippet"
)]
pub async fn create_snippet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    requester: Requester,
    body: BodyResult,
) -> Result<HttpResponse, actix_web::Error> {
    let payload = admit(AccessMethod::Post, &requester, body)?;
    let created = state
        .snippets
        .create(CreateSnippetRequest { requester, payload })
        .await?;
    let body = SnippetResponse::build(&created, &Links::new(&req))?;
    Ok(HttpResponse::Created().json(body))
}

/// Fetch a single snippet.
#[utoipa::path(
    get,
    path = "/snippets/{id}/",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Snippet", body = SnippetResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "retrieveSnippet",
    security([])
)]
pub async fn retrieve_snippet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<SnippetResponse>, Error> {
    let details = state.snippets_query.retrieve(&path).await?;
    Ok(web::Json(SnippetResponse::build(&details, &Links::new(&req))?))
}

async fn write_snippet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    requester: Requester,
    id: String,
    body: BodyResult,
    method: AccessMethod,
) -> Result<HttpResponse, actix_web::Error> {
    let payload = admit(method, &requester, body)?;
    let request = UpdateSnippetRequest {
        requester,
        id,
        payload,
    };
    let updated = if method == AccessMethod::Put {
        state.snippets.update(request).await?
    } else {
        state.snippets.partial_update(request).await?
    };
    let body = SnippetResponse::build(&updated, &Links::new(&req))?;
    Ok(HttpResponse::Ok().json(body))
}

/// Replace a snippet's content. `code` is required.
#[utoipa::path(
    put,
    path = "/snippets/{id}/",
    params(("id" = i64, Path, description = "Snippet id")),
    request_body = SnippetBody,
    responses(
        (status = 200, description = "Updated", body = SnippetResponse),
        (status = 400, description = "Invalid snippet", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "updateSnippet"
)]
pub async fn update_snippet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    requester: Requester,
    path: web::Path<String>,
    body: BodyResult,
) -> Result<HttpResponse, actix_web::Error> {
    write_snippet(
        req,
        state,
        requester,
        path.into_inner(),
        body,
        AccessMethod::Put,
    )
    .await
}

/// Change only the supplied snippet fields.
#[utoipa::path(
    patch,
    path = "/snippets/{id}/",
    params(("id" = i64, Path, description = "Snippet id")),
    request_body = SnippetBody,
    responses(
        (status = 200, description = "Updated", body = SnippetResponse),
        (status = 400, description = "Invalid snippet", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "partialUpdateSnippet"
)]
pub async fn partial_update_snippet(
    req: HttpRequest,
    state: web::Data<HttpState>,
    requester: Requester,
    path: web::Path<String>,
    body: BodyResult,
) -> Result<HttpResponse, actix_web::Error> {
    write_snippet(
        req,
        state,
        requester,
        path.into_inner(),
        body,
        AccessMethod::Patch,
    )
    .await
}

/// Delete a snippet.
#[utoipa::path(
    delete,
    path = "/snippets/{id}/",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "destroySnippet"
)]
pub async fn destroy_snippet(
    state: web::Data<HttpState>,
    requester: Requester,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    state
        .snippets
        .destroy(DeleteSnippetRequest {
            requester,
            id: path.into_inner(),
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Serve the stored highlighted HTML document.
#[utoipa::path(
    get,
    path = "/snippets/{id}/highlight/",
    params(("id" = i64, Path, description = "Snippet id")),
    responses(
        (status = 200, description = "Highlighted HTML", content_type = "text/html", body = String),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["snippets"],
    operation_id = "highlightSnippet",
    security([])
)]
pub async fn highlight_snippet(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let html = state.snippets_query.highlight(&path).await?;
    debug!(id = %path, bytes = html.len(), "serving highlighted snippet");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}

#[cfg(test)]
#[path = "snippets_tests.rs"]
mod tests;
