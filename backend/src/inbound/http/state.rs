//! Shared HTTP adapter state.
//!
//! Handlers take `web::Data<HttpState>` and only see the driving ports, so
//! they can be exercised against mocks or in-memory adapters.

use std::sync::Arc;

use crate::domain::ports::{GroupsQuery, LoginService, SnippetCommand, SnippetQuery, UsersQuery};

/// Port implementations handed to [`HttpState::new`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub snippets: Arc<dyn SnippetCommand>,
    pub snippets_query: Arc<dyn SnippetQuery>,
    pub users: Arc<dyn UsersQuery>,
    pub groups: Arc<dyn GroupsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState(HttpStatePorts);

impl HttpState {
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureHighlighter;
    /// use backend::domain::{
    ///     AccountLoginService, GroupsQueryService, SnippetService, UsersQueryService,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::{MemoryAccountDirectory, MemorySnippetRepository};
    ///
    /// let snippets = Arc::new(MemorySnippetRepository::new());
    /// let accounts = Arc::new(MemoryAccountDirectory::development().unwrap());
    /// let service = Arc::new(SnippetService::new(
    ///     snippets.clone(),
    ///     accounts.clone(),
    ///     Arc::new(FixtureHighlighter),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(AccountLoginService::new(accounts.clone())),
    ///     snippets: service.clone(),
    ///     snippets_query: service,
    ///     users: Arc::new(UsersQueryService::new(accounts.clone(), snippets)),
    ///     groups: Arc::new(GroupsQueryService::new(accounts)),
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        Self(ports)
    }
}

impl std::ops::Deref for HttpState {
    type Target = HttpStatePorts;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
