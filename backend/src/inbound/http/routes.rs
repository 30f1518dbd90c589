//! Route table for the HTTP adapter.
//!
//! Every resource is named so handlers can build absolute links with
//! `HttpRequest::url_for`; see [`super::links`]. Readable resources also
//! answer `HEAD` through their `GET` handler, and every resource answers
//! `OPTIONS` with its `Allow` header.

use actix_web::http::{Method, header};
use actix_web::{HttpResponse, Route, web};

use super::error::json_error_handler;
use super::links::{
    API_ROOT, GROUP_DETAIL, GROUP_LIST, SNIPPET_DETAIL, SNIPPET_HIGHLIGHT, SNIPPET_LIST,
    USER_DETAIL, USER_LIST,
};
use super::{auth, groups, health, root, snippets, users};

/// Request bodies above this size are rejected with `invalid_request`.
pub const JSON_LIMIT: usize = 64 * 1024;

const READ_ONLY: &str = "GET, HEAD, OPTIONS";
const LIST_CREATE: &str = "GET, POST, HEAD, OPTIONS";
const DETAIL: &str = "GET, PUT, PATCH, DELETE, HEAD, OPTIONS";
const POST_ONLY: &str = "POST, OPTIONS";

fn options(allow: &'static str) -> Route {
    web::method(Method::OPTIONS).to(move || async move {
        HttpResponse::Ok()
            .insert_header((header::ALLOW, allow))
            .finish()
    })
}

/// Register the API resources and the JSON body configuration.
///
/// Requires `web::Data<HttpState>` and a session middleware on the app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(json_error_handler),
    )
    .service(
        web::resource("/")
            .name(API_ROOT)
            .route(web::get().to(root::api_root))
            .route(web::head().to(root::api_root))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/snippets/")
            .name(SNIPPET_LIST)
            .route(web::get().to(snippets::list_snippets))
            .route(web::head().to(snippets::list_snippets))
            .route(web::post().to(snippets::create_snippet))
            .route(options(LIST_CREATE)),
    )
    .service(
        web::resource("/snippets/{id}/")
            .name(SNIPPET_DETAIL)
            .route(web::get().to(snippets::retrieve_snippet))
            .route(web::head().to(snippets::retrieve_snippet))
            .route(web::put().to(snippets::update_snippet))
            .route(web::patch().to(snippets::partial_update_snippet))
            .route(web::delete().to(snippets::destroy_snippet))
            .route(options(DETAIL)),
    )
    .service(
        web::resource("/snippets/{id}/highlight/")
            .name(SNIPPET_HIGHLIGHT)
            .route(web::get().to(snippets::highlight_snippet))
            .route(web::head().to(snippets::highlight_snippet))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/users/")
            .name(USER_LIST)
            .route(web::get().to(users::list_users))
            .route(web::head().to(users::list_users))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/users/{id}/")
            .name(USER_DETAIL)
            .route(web::get().to(users::retrieve_user))
            .route(web::head().to(users::retrieve_user))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/groups/")
            .name(GROUP_LIST)
            .route(web::get().to(groups::list_groups))
            .route(web::head().to(groups::list_groups))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/groups/{id}/")
            .name(GROUP_DETAIL)
            .route(web::get().to(groups::retrieve_group))
            .route(web::head().to(groups::retrieve_group))
            .route(options(READ_ONLY)),
    )
    .service(
        web::resource("/api-auth/login/")
            .route(web::post().to(auth::login))
            .route(options(POST_ONLY)),
    )
    .service(
        web::resource("/api-auth/logout/")
            .route(web::post().to(auth::logout))
            .route(options(POST_ONLY)),
    );
}

/// Register the probes. Requires `web::Data<HealthState>`.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.route("/health/ready", web::get().to(health::ready))
        .route("/health/live", web::get().to(health::live));
}

#[cfg(test)]
mod tests {
    use actix_web::http::header::{ALLOW, CONTENT_TYPE};
    use actix_web::http::{Method, StatusCode};
    use actix_web::test;
    use rstest::rstest;

    use crate::inbound::http::test_utils::test_app;

    #[rstest]
    #[case("/snippets/1/highlight/extra/")]
    #[case("/snippets")]
    #[case("/nowhere/")]
    #[actix_web::test]
    async fn unrouted_paths_are_not_found(#[case] uri: &str) {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/", "GET, HEAD, OPTIONS")]
    #[case("/snippets/", "GET, POST, HEAD, OPTIONS")]
    #[case("/snippets/1/", "GET, PUT, PATCH, DELETE, HEAD, OPTIONS")]
    #[case("/api-auth/login/", "POST, OPTIONS")]
    #[actix_web::test]
    async fn options_lists_allowed_methods(#[case] uri: &str, #[case] allow: &str) {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri(uri)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(ALLOW).and_then(|value| value.to_str().ok()),
            Some(allow)
        );
    }

    #[rstest]
    #[case("/")]
    #[case("/snippets/")]
    #[case("/users/")]
    #[case("/groups/")]
    #[actix_web::test]
    async fn head_is_answered_like_get(#[case] uri: &str) {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::default()
                .method(Method::HEAD)
                .uri(uri)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_bodies_are_invalid_requests() {
        let app = test::init_service(test_app()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api-auth/login/")
                .insert_header((CONTENT_TYPE, "application/json"))
                .set_payload(vec![b' '; super::JSON_LIMIT + 1])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
