//! HTTP inbound adapter exposing the snippets REST API.

pub mod auth;
pub mod error;
pub mod groups;
pub mod health;
pub(crate) mod links;
pub mod requester;
pub mod root;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod snippets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
