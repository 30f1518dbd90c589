//! Read-only group handlers.

use actix_web::{HttpRequest, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::links::Links;
use crate::inbound::http::schemas::{ErrorSchema, GroupResponse};
use crate::inbound::http::state::HttpState;

#[utoipa::path(
    get,
    path = "/groups/",
    responses(
        (status = 200, description = "Groups", body = [GroupResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "listGroups",
    security([])
)]
pub async fn list_groups(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<GroupResponse>>> {
    let links = Links::new(&req);
    let groups = state.groups.list_groups().await?;
    let body = groups
        .iter()
        .map(|group| GroupResponse::build(group, &links))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(web::Json(body))
}

#[utoipa::path(
    get,
    path = "/groups/{id}/",
    params(("id" = i64, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group", body = GroupResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["groups"],
    operation_id = "retrieveGroup",
    security([])
)]
pub async fn retrieve_group(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<GroupResponse>> {
    let group = state.groups.get_group(&path).await?;
    Ok(web::Json(GroupResponse::build(&group, &Links::new(&req))?))
}
