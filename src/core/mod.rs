//! Core data model and process launching.
//!
//! Nothing in this module depends on any TUI or rendering crate — the store
//! is plain data so it can be tested without a terminal.

pub mod launch;
pub mod store;
