//! `ledgerdesk-core`: shared building blocks.
//!
//! This crate contains **transport-free** primitives used by every record
//! crate and by the HTTP client (no IO, no async).

pub mod error;
pub mod id;
pub mod lenient;

pub use error::DomainError;
pub use id::RecordId;
