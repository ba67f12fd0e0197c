//! `ledgerdesk-desktop`
//!
//! **Responsibility:** application wiring for the LedgerDesk client.
//!
//! This crate provides:
//! - [`AppState`]: configuration, storage, the session and every API client,
//!   built once at start-up
//! - a small command-line shell over the clients and forms
//!
//! The backend remains the authority; nothing here caches records beyond the
//! contact person cache.

pub mod shell;
pub mod state;

pub use shell::{Cli, Command};
pub use state::AppState;
