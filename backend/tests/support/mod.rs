//! Shared application harness for the HTTP integration suites.
//!
//! Mirrors the production composition: session cookies, trace ids and
//! trailing-slash normalisation around the API route table, with the real
//! `syntect` highlighter behind the snippet service.

use std::sync::{Arc, OnceLock};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, web};
use backend::Trace;
use backend::domain::ports::Highlighter;
use backend::domain::{AccountLoginService, GroupsQueryService, SnippetService, UsersQueryService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::routes;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::highlight::SyntectHighlighter;
use backend::outbound::memory::{
    AccountSeed, GroupSeed, MemoryAccountDirectory, MemorySnippetRepository, UserSeed,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mockable::DefaultClock;
use uuid::Uuid;
use zeroize::Zeroizing;

pub const ALICE_ID: &str = "aaaaaaaa-0000-4000-8000-000000000001";
pub const BOB_ID: &str = "bbbbbbbb-0000-4000-8000-000000000002";
pub const PASSWORD: &str = "correct horse";

fn highlighter() -> Arc<dyn Highlighter> {
    static SHARED: OnceLock<Arc<SyntectHighlighter>> = OnceLock::new();
    SHARED
        .get_or_init(|| Arc::new(SyntectHighlighter::new()))
        .clone()
}

fn user(id: &str, username: &str) -> UserSeed {
    UserSeed {
        id: Some(Uuid::parse_str(id).expect("fixture uuid")),
        username: username.to_owned(),
        password: Zeroizing::new(PASSWORD.to_owned()),
    }
}

/// `alice`, `bob` and two groups.
pub fn accounts() -> MemoryAccountDirectory {
    MemoryAccountDirectory::from_seed(AccountSeed {
        users: vec![user(ALICE_ID, "alice"), user(BOB_ID, "bob")],
        groups: vec![
            GroupSeed {
                id: 1,
                name: "reviewers".to_owned(),
            },
            GroupSeed {
                id: 2,
                name: "maintainers".to_owned(),
            },
        ],
    })
    .expect("fixture accounts")
}

/// Handler state over a fresh snippet table.
pub fn state(accounts: MemoryAccountDirectory) -> web::Data<HttpState> {
    let accounts = Arc::new(accounts);
    let snippets = Arc::new(MemorySnippetRepository::new());
    let service = Arc::new(SnippetService::new(
        snippets.clone(),
        accounts.clone(),
        highlighter(),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(AccountLoginService::new(accounts.clone())),
        snippets: service.clone(),
        snippets_query: service,
        users: Arc::new(UsersQueryService::new(accounts.clone(), snippets)),
        groups: Arc::new(GroupsQueryService::new(accounts)),
    }))
}

/// Application over `state`, composed like the production server.
pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(health)
        .app_data(state)
        .wrap(
            SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                .cookie_name("session".to_owned())
                .cookie_secure(false)
                .build(),
        )
        .wrap(Trace)
        .configure(routes::configure_health)
        .service(
            web::scope("")
                .wrap(NormalizePath::new(TrailingSlash::Always))
                .configure(routes::configure),
        )
}

/// `Authorization` header value for HTTP Basic credentials.
pub fn basic(username: &str) -> (&'static str, String) {
    (
        "Authorization",
        format!("Basic {}", STANDARD.encode(format!("{username}:{PASSWORD}"))),
    )
}

/// The `session` cookie set on `response`.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
