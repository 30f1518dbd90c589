//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process snippet storage and the read-only account
//!   directory
//! - **highlight**: `syntect` rendering of snippet HTML
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod highlight;
pub mod memory;
