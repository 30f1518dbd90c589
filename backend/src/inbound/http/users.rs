//! Read-only user directory handlers.
//!
//! ```text
//! GET /users/
//! GET /users/{id}/
//! ```

use actix_web::{HttpRequest, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::links::Links;
use crate::inbound::http::schemas::{ErrorSchema, UserResponse};
use crate::inbound::http::state::HttpState;

/// List known users with links to their snippets.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().route("/users/", web::get().to(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
pub async fn list_users(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let links = Links::new(&req);
    let users = state.users.list_users().await?;
    let body = users
        .iter()
        .map(|summary| UserResponse::build(summary, &links))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(web::Json(body))
}

#[utoipa::path(
    get,
    path = "/users/{id}/",
    params(("id" = String, Path, description = "User id (UUID)")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "retrieveUser",
    security([])
)]
pub async fn retrieve_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let summary = state.users.get_user(&path).await?;
    Ok(web::Json(UserResponse::build(&summary, &Links::new(&req))?))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{ALICE_ID, ALICE_PASSWORD, basic_auth, test_app};

    #[rstest]
    #[actix_web::test]
    async fn users_link_their_snippets() {
        let app = test::init_service(test_app()).await;
        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/snippets/")
                .insert_header((AUTHORIZATION, basic_auth("alice", ALICE_PASSWORD)))
                .set_json(json!({"code": "x"}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/users/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        let users = body.as_array().expect("array");
        assert_eq!(users.len(), 2);
        let alice = users
            .iter()
            .find(|user| user["username"] == "alice")
            .expect("alice listed");
        assert_eq!(alice["id"], ALICE_ID);
        assert_eq!(
            alice["url"],
            format!("http://localhost:8080/users/{ALICE_ID}/")
        );
        assert_eq!(alice["snippets"], json!(["http://localhost:8080/snippets/1/"]));
        assert!(alice.get("password").is_none());
    }

    #[rstest]
    #[case(format!("/users/{ALICE_ID}/"), StatusCode::OK)]
    #[case("/users/99999999-9999-9999-9999-999999999999/".to_owned(), StatusCode::NOT_FOUND)]
    #[case("/users/not-a-uuid/".to_owned(), StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn retrieve_by_id(#[case] uri: String, #[case] status: StatusCode) {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn users_are_read_only() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users/")
                .insert_header((AUTHORIZATION, basic_auth("alice", ALICE_PASSWORD)))
                .set_json(json!({"username": "eve"}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
