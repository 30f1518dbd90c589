//! Absolute hyperlinks between resources.
//!
//! Resource names are registered in [`super::routes::configure`]; the scheme
//! and host come from the request's connection info.

use actix_web::HttpRequest;

use crate::domain::{Error, GroupId, SnippetId, UserId};

pub(crate) const API_ROOT: &str = "api-root";
pub(crate) const SNIPPET_LIST: &str = "snippet-list";
pub(crate) const SNIPPET_DETAIL: &str = "snippet-detail";
pub(crate) const SNIPPET_HIGHLIGHT: &str = "snippet-highlight";
pub(crate) const USER_LIST: &str = "user-list";
pub(crate) const USER_DETAIL: &str = "user-detail";
pub(crate) const GROUP_LIST: &str = "group-list";
pub(crate) const GROUP_DETAIL: &str = "group-detail";

/// Builds URLs for named resources relative to the current request.
pub(crate) struct Links<'a> {
    req: &'a HttpRequest,
}

impl<'a> Links<'a> {
    pub(crate) fn new(req: &'a HttpRequest) -> Self {
        Self { req }
    }

    fn url(&self, name: &str, elements: &[String]) -> Result<String, Error> {
        self.req
            .url_for(name, elements)
            .map(String::from)
            .map_err(|error| Error::internal(format!("failed to build {name} url: {error:?}")))
    }

    pub(crate) fn collection(&self, name: &str) -> Result<String, Error> {
        self.url(name, &[])
    }

    pub(crate) fn snippet(&self, id: SnippetId) -> Result<String, Error> {
        self.url(SNIPPET_DETAIL, &[id.to_string()])
    }

    pub(crate) fn highlight(&self, id: SnippetId) -> Result<String, Error> {
        self.url(SNIPPET_HIGHLIGHT, &[id.to_string()])
    }

    pub(crate) fn user(&self, id: &UserId) -> Result<String, Error> {
        self.url(USER_DETAIL, &[id.to_string()])
    }

    pub(crate) fn group(&self, id: GroupId) -> Result<String, Error> {
        self.url(GROUP_DETAIL, &[id.to_string()])
    }
}
