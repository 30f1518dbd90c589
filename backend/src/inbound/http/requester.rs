//! Resolve the [`Requester`] for a request.
//!
//! HTTP Basic credentials take precedence and must be valid when present.
//! Otherwise the user id stored in the session cookie is used, and a request
//! with neither is anonymous.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures_util::future::LocalBoxFuture;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, Requester};
use crate::inbound::http::session::LoginSession;
use crate::inbound::http::state::HttpState;

fn malformed() -> Error {
    Error::unauthorized("invalid basic authentication header")
}

/// Parse `Authorization: Basic …`. Other schemes are ignored.
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Result<Option<LoginCredentials>, Error> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| malformed())?;
    let Some((scheme, encoded)) = value.trim().split_once(' ') else {
        return Ok(None);
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return Ok(None);
    }
    let decoded = Zeroizing::new(STANDARD.decode(encoded.trim()).map_err(|_| malformed())?);
    let decoded = std::str::from_utf8(&decoded).map_err(|_| malformed())?;
    let (username, password) = decoded.split_once(':').ok_or_else(malformed)?;
    LoginCredentials::try_from_parts(username, password)
        .map(Some)
        .map_err(|_| Error::unauthorized("invalid credentials"))
}

impl FromRequest for Requester {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let basic = basic_credentials(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let session = LoginSession::from_request(req, payload);
        Box::pin(async move {
            if let Some(credentials) = basic? {
                let state =
                    state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
                let user_id = state.login.authenticate(&credentials).await?;
                return Ok(Requester::User(user_id));
            }
            let session = session.await?;
            Ok(session
                .signed_in_user()?
                .map_or(Requester::Anonymous, Requester::User))
        })
    }
}
