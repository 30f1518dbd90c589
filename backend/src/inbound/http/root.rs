//! API root listing the top-level collections.

use actix_web::{HttpRequest, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::links::Links;
use crate::inbound::http::schemas::{ApiRootResponse, ErrorSchema};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Collection links", body = ApiRootResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["root"],
    operation_id = "apiRoot",
    security([])
)]
pub async fn api_root(req: HttpRequest) -> ApiResult<web::Json<ApiRootResponse>> {
    Ok(web::Json(ApiRootResponse::build(&Links::new(&req))?))
}
