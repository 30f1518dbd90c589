//! Cookie-session view of who is signed in.
//!
//! Handlers receive a [`LoginSession`] instead of the raw Actix session so
//! the only value ever stored is the signed-in user's id.

use actix_session::{Session, SessionExt as _};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Error, UserId};

/// Session entry holding the signed-in user's id.
pub(crate) const SIGNED_IN_USER: &str = "user_id";

#[derive(Clone)]
pub struct LoginSession {
    inner: Session,
}

impl LoginSession {
    /// Record `user_id` as signed in. The session key is rotated first so a
    /// cookie issued before login cannot be replayed afterwards.
    pub fn sign_in(&self, user_id: &UserId) -> Result<(), Error> {
        self.inner.renew();
        self.inner
            .insert(SIGNED_IN_USER, user_id.as_ref())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))
    }

    /// The signed-in user, or `None` for anonymous sessions.
    ///
    /// A stored value that no longer parses as a user id is logged and
    /// treated as anonymous.
    pub fn signed_in_user(&self) -> Result<Option<UserId>, Error> {
        let stored = self
            .inner
            .get::<String>(SIGNED_IN_USER)
            .map_err(|error| Error::internal(format!("session read failed: {error}")))?;
        Ok(stored.and_then(|raw| {
            UserId::new(&raw)
                .inspect_err(|error| warn!(%error, "discarding malformed session user id"))
                .ok()
        }))
    }

    /// Forget the user and expire the cookie.
    pub fn sign_out(&self) {
        self.inner.purge();
    }
}

impl FromRequest for LoginSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self {
            inner: req.get_session(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use crate::inbound::http::test_utils::{ALICE_ID, session_cookie, test_session_middleware};

    async fn current(session: LoginSession) -> Result<HttpResponse, Error> {
        let body = session
            .signed_in_user()?
            .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
        Ok(HttpResponse::Ok().body(body))
    }

    async fn store_raw(session: Session, raw: web::Path<String>) -> HttpResponse {
        match session.insert(SIGNED_IN_USER, raw.into_inner()) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[rstest]
    #[case(ALICE_ID, ALICE_ID)]
    #[case("not-a-uuid", "anonymous")]
    #[actix_web::test]
    async fn stored_value_decides_the_user(#[case] stored: &str, #[case] expected: &str) {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/store/{raw}", web::get().to(store_raw))
                .route("/current", web::get().to(current)),
        )
        .await;

        let stored_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/store/{stored}"))
                .to_request(),
        )
        .await;
        assert_eq!(stored_res.status(), StatusCode::OK);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/current")
                .cookie(session_cookie(&stored_res))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn sign_out_clears_the_user() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/sign-in",
                    web::get().to(|session: LoginSession| async move {
                        session.sign_in(&UserId::new(ALICE_ID).expect("fixture id"))?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/sign-out",
                    web::get().to(|session: LoginSession| async move {
                        session.sign_out();
                        HttpResponse::Ok()
                    }),
                )
                .route("/current", web::get().to(current)),
        )
        .await;

        let signed_in =
            test::call_service(&app, test::TestRequest::get().uri("/sign-in").to_request()).await;
        let signed_out = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/sign-out")
                .cookie(session_cookie(&signed_in))
                .to_request(),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/current")
                .cookie(session_cookie(&signed_out))
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "anonymous");
    }
}
