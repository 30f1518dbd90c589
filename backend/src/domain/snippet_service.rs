//! Snippet domain service.
//!
//! Implements both snippet driving ports. Write paths follow a fixed order:
//! request-level access check, id parsing and lookup, object-level access
//! check, payload validation, rendering, persistence. Anonymous writes are
//! therefore refused before a missing id is noticed, while authenticated
//! writes against a missing id surface as not found.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateSnippetRequest, DeleteSnippetRequest, HighlightError, Highlighter, SnippetCommand,
    SnippetDetails, SnippetPayload, SnippetQuery, SnippetRepository, SnippetRepositoryError,
    UpdateSnippetRequest, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessMethod, Error, FieldErrors, Language, NewSnippet, Policy, Requester, Snippet,
    SnippetChanges, SnippetCode, SnippetContent, SnippetId, SnippetTitle, Style, UserId, Username,
};

fn map_snippet_repository_error(error: SnippetRepositoryError) -> Error {
    match error {
        SnippetRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("snippet repository unavailable: {message}"))
        }
        SnippetRepositoryError::Query { message } => {
            Error::internal(format!("snippet repository error: {message}"))
        }
    }
}

fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_highlight_error(error: HighlightError) -> Error {
    Error::internal(format!("snippet rendering failed: {error}"))
}

/// Parse a raw path id. Anything but a positive integer is not found.
pub(crate) fn parse_snippet_id(raw: &str) -> Result<SnippetId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| SnippetId::new(value).ok())
        .ok_or_else(|| Error::not_found(format!("snippet {raw} not found")))
}

/// How a payload relates to the stored content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadMode {
    /// `code` must be present; omitted fields keep their current values.
    Full,
    /// Every field is optional.
    Partial,
}

/// Snippet service implementing [`SnippetCommand`] and [`SnippetQuery`].
#[derive(Clone)]
pub struct SnippetService<S, U> {
    snippets: Arc<S>,
    users: Arc<U>,
    highlighter: Arc<dyn Highlighter>,
    clock: Arc<dyn Clock>,
    policy: Arc<Policy>,
}

impl<S, U> SnippetService<S, U> {
    /// Create a service guarded by [`Policy::snippets`].
    pub fn new(
        snippets: Arc<S>,
        users: Arc<U>,
        highlighter: Arc<dyn Highlighter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_policy(snippets, users, highlighter, clock, Policy::snippets())
    }

    pub fn with_policy(
        snippets: Arc<S>,
        users: Arc<U>,
        highlighter: Arc<dyn Highlighter>,
        clock: Arc<dyn Clock>,
        policy: Policy,
    ) -> Self {
        Self {
            snippets,
            users,
            highlighter,
            clock,
            policy: Arc::new(policy),
        }
    }
}

impl<S, U> SnippetService<S, U>
where
    S: SnippetRepository,
    U: UserRepository,
{
    async fn load(&self, id: SnippetId) -> Result<Snippet, Error> {
        self.snippets
            .find_by_id(id)
            .await
            .map_err(map_snippet_repository_error)?
            .ok_or_else(|| Error::not_found(format!("snippet {id} not found")))
    }

    /// Check the request, then load the target and check the object.
    async fn load_for_write(
        &self,
        method: AccessMethod,
        requester: &Requester,
        raw_id: &str,
    ) -> Result<Snippet, Error> {
        self.policy.check_request(method, requester)?;
        let id = parse_snippet_id(raw_id)?;
        let snippet = self.load(id).await?;
        self.policy.check_object(method, requester, snippet.owner())?;
        Ok(snippet)
    }

    async fn owner_name(&self, owner: &UserId) -> Result<Username, Error> {
        self.users
            .find_by_id(owner)
            .await
            .map_err(map_user_repository_error)?
            .map(|user| user.username().clone())
            .ok_or_else(|| Error::internal(format!("snippet owner {owner} does not exist")))
    }

    async fn details(&self, snippet: Snippet) -> Result<SnippetDetails, Error> {
        let owner = self.owner_name(snippet.owner()).await?;
        Ok(SnippetDetails { snippet, owner })
    }

    /// Validate `payload` and merge it over `current`.
    fn validate(
        &self,
        payload: SnippetPayload,
        current: Option<SnippetContent>,
        mode: PayloadMode,
    ) -> Result<SnippetContent, Error> {
        let mut errors = FieldErrors::new();

        let title = payload
            .title
            .and_then(|raw| errors.collect("title", SnippetTitle::new(raw)));
        let code = payload
            .code
            .and_then(|raw| errors.collect("code", SnippetCode::new(raw)));
        let language = payload
            .language
            .and_then(|raw| errors.collect("language", Language::new(raw)));
        let style = payload
            .style
            .and_then(|raw| errors.collect("style", Style::new(raw)));

        if code.is_none() && mode == PayloadMode::Full && !errors.contains("code") {
            errors.push("code", "required", "this field is required");
        }
        if let Some(language) = language
            .as_ref()
            .filter(|language| !self.highlighter.supports_language(language))
        {
            errors.push(
                "language",
                "invalid_choice",
                format!("\"{language}\" is not a valid choice"),
            );
        }
        if let Some(style) = style
            .as_ref()
            .filter(|style| !self.highlighter.supports_style(style))
        {
            errors.push(
                "style",
                "invalid_choice",
                format!("\"{style}\" is not a valid choice"),
            );
        }
        errors.into_result()?;

        let changes = SnippetChanges {
            title,
            code,
            linenos: payload.linenos,
            language,
            style,
        };
        match (current, changes.code.clone()) {
            (Some(current), _) => Ok(changes.apply_to(current)),
            (None, Some(code)) => Ok(changes.apply_to(SnippetContent::with_code(code))),
            (None, None) => Err(Error::invalid_request("code is required")),
        }
    }

    async fn revise(
        &self,
        request: UpdateSnippetRequest,
        method: AccessMethod,
        mode: PayloadMode,
    ) -> Result<SnippetDetails, Error> {
        let UpdateSnippetRequest {
            requester,
            id,
            payload,
        } = request;
        let current = self.load_for_write(method, &requester, &id).await?;
        let content = self.validate(payload, Some(current.content().clone()), mode)?;
        let highlighted = self
            .highlighter
            .render(&content)
            .map_err(map_highlight_error)?;
        let revised = current.revise(content, highlighted);

        let stored = self
            .snippets
            .update(&revised)
            .await
            .map_err(map_snippet_repository_error)?;
        if !stored {
            return Err(Error::not_found(format!(
                "snippet {} not found",
                revised.id()
            )));
        }
        info!(snippet_id = %revised.id(), requester = %requester, method = %method, "snippet updated");
        self.details(revised).await
    }
}

#[async_trait]
impl<S, U> SnippetCommand for SnippetService<S, U>
where
    S: SnippetRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateSnippetRequest) -> Result<SnippetDetails, Error> {
        let CreateSnippetRequest { requester, payload } = request;
        self.policy.check_request(AccessMethod::Post, &requester)?;
        let owner = requester
            .user_id()
            .cloned()
            .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))?;

        let content = self.validate(payload, None, PayloadMode::Full)?;
        let highlighted = self
            .highlighter
            .render(&content)
            .map_err(map_highlight_error)?;
        let snippet = self
            .snippets
            .insert(NewSnippet {
                created: self.clock.utc(),
                owner,
                content,
                highlighted,
            })
            .await
            .map_err(map_snippet_repository_error)?;

        info!(snippet_id = %snippet.id(), owner = %snippet.owner(), "snippet created");
        self.details(snippet).await
    }

    async fn update(&self, request: UpdateSnippetRequest) -> Result<SnippetDetails, Error> {
        self.revise(request, AccessMethod::Put, PayloadMode::Full)
            .await
    }

    async fn partial_update(
        &self,
        request: UpdateSnippetRequest,
    ) -> Result<SnippetDetails, Error> {
        self.revise(request, AccessMethod::Patch, PayloadMode::Partial)
            .await
    }

    async fn destroy(&self, request: DeleteSnippetRequest) -> Result<(), Error> {
        let snippet = self
            .load_for_write(AccessMethod::Delete, &request.requester, &request.id)
            .await?;
        let removed = self
            .snippets
            .delete(snippet.id())
            .await
            .map_err(map_snippet_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!(
                "snippet {} not found",
                snippet.id()
            )));
        }
        info!(snippet_id = %snippet.id(), requester = %request.requester, "snippet deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, U> SnippetQuery for SnippetService<S, U>
where
    S: SnippetRepository,
    U: UserRepository,
{
    async fn list(&self) -> Result<Vec<SnippetDetails>, Error> {
        let snippets = self
            .snippets
            .list()
            .await
            .map_err(map_snippet_repository_error)?;
        let usernames: HashMap<UserId, Username> = self
            .users
            .list()
            .await
            .map_err(map_user_repository_error)?
            .into_iter()
            .map(|user| (user.id().clone(), user.username().clone()))
            .collect();

        snippets
            .into_iter()
            .map(|snippet| {
                let owner = usernames.get(snippet.owner()).cloned().ok_or_else(|| {
                    Error::internal(format!("snippet owner {} does not exist", snippet.owner()))
                })?;
                Ok(SnippetDetails { snippet, owner })
            })
            .collect()
    }

    async fn retrieve(&self, id: &str) -> Result<SnippetDetails, Error> {
        let snippet = self.load(parse_snippet_id(id)?).await?;
        self.details(snippet).await
    }

    async fn highlight(&self, id: &str) -> Result<String, Error> {
        let snippet = self.load(parse_snippet_id(id)?).await?;
        Ok(snippet.highlighted().to_owned())
    }
}

#[cfg(test)]
#[path = "snippet_service_tests.rs"]
mod tests;
