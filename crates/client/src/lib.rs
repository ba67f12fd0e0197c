//! `ledgerdesk-client`: typed REST clients for the LedgerDesk backend.
//!
//! **Responsibility:** one generic [`ResourceClient`] per backend noun, plus
//! the auth round trips. Every client shares a [`HttpClient`], which carries
//! the base URL and the session context.
//!
//! Reads never fail outright: they return [`Fetched`], which tells "no
//! records" apart from "request failed" while still offering the
//! empty-on-failure view. Writes return `Result<_, ApiError>`.

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod fetched;
pub mod filter;
pub mod http;
pub mod resource;
pub mod resources;

pub use auth::{AuthClient, Credentials, LoginSession};
pub use clients::ApiClients;
pub use config::ClientConfig;
pub use error::ApiError;
pub use fetched::Fetched;
pub use http::HttpClient;
pub use resource::{Resource, ResourceClient};
