//! Builders wiring the in-memory adapters into HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use backend::domain::ports::Highlighter;
use backend::domain::{AccountLoginService, GroupsQueryService, SnippetService, UsersQueryService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::highlight::SyntectHighlighter;
use backend::outbound::memory::{MemoryAccountDirectory, MemorySnippetRepository};

use super::ServerConfig;

/// Assemble the handler state over a fresh snippet table.
///
/// The account directory is shared with `config`; the snippet table lives
/// for as long as the returned state.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    build_http_state_with(config.accounts.clone(), Arc::new(SyntectHighlighter::new()))
}

pub(super) fn build_http_state_with(
    accounts: Arc<MemoryAccountDirectory>,
    highlighter: Arc<dyn Highlighter>,
) -> web::Data<HttpState> {
    let snippets = Arc::new(MemorySnippetRepository::new());
    let service = Arc::new(SnippetService::new(
        snippets.clone(),
        accounts.clone(),
        highlighter,
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
