//! In-process adapters for the storage ports.
//!
//! Snippets live in a locked table for the lifetime of the process. Users
//! and groups come from an accounts document loaded once at startup.

mod accounts;
mod snippet_repository;

pub use accounts::{
    AccountSeed, AccountSeedError, DEVELOPMENT_USER_ID, GroupSeed, MemoryAccountDirectory,
    UserSeed,
};
pub use snippet_repository::MemorySnippetRepository;
