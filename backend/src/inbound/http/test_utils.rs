//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mockable::DefaultClock;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::ports::FixtureHighlighter;
use crate::domain::{AccountLoginService, GroupsQueryService, SnippetService, UsersQueryService};
use crate::inbound::http::routes;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    AccountSeed, GroupSeed, MemoryAccountDirectory, MemorySnippetRepository, UserSeed,
};

pub const ALICE_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const ALICE_PASSWORD: &str = "alice-password";
pub const BOB_ID: &str = "22222222-2222-2222-2222-222222222222";
pub const BOB_PASSWORD: &str = "bob-password";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// `Authorization` header value for HTTP Basic credentials.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn fixture_user(id: &str, username: &str, password: &str) -> UserSeed {
    UserSeed {
        id: Some(Uuid::parse_str(id).expect("fixture uuid")),
        username: username.to_owned(),
        password: Zeroizing::new(password.to_owned()),
    }
}

/// Directory holding `alice`, `bob` and a single `editors` group.
pub fn fixture_accounts() -> MemoryAccountDirectory {
    MemoryAccountDirectory::from_seed(AccountSeed {
        users: vec![
            fixture_user(ALICE_ID, "alice", ALICE_PASSWORD),
            fixture_user(BOB_ID, "bob", BOB_PASSWORD),
        ],
        groups: vec![GroupSeed {
            id: 1,
            name: "editors".to_owned(),
        }],
    })
    .expect("fixture accounts are valid")
}

/// Handler state backed by in-memory adapters and the fixture highlighter.
pub fn test_state() -> HttpState {
    let accounts = Arc::new(fixture_accounts());
    let snippets = Arc::new(MemorySnippetRepository::new());
    let service = Arc::new(SnippetService::new(
        snippets.clone(),
        accounts.clone(),
        Arc::new(FixtureHighlighter),
        Arc::new(DefaultClock),
    ));
    HttpState::new(HttpStatePorts {
        login: Arc::new(AccountLoginService::new(accounts.clone())),
        snippets: service.clone(),
        snippets_query: service,
        users: Arc::new(UsersQueryService::new(accounts.clone(), snippets)),
        groups: Arc::new(GroupsQueryService::new(accounts)),
    })
}

/// Application exposing the full route table over [`test_state`].
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_state()))
        .wrap(test_session_middleware())
        .configure(routes::configure)
}
