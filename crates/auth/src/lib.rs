//! `ledgerdesk-auth`: session and access boundary of the client.
//!
//! This crate stays out of HTTP: the client crate performs
//! the login/logout round trips and feeds results into the types here.

pub mod guard;
pub mod roles;
pub mod session;
pub mod user;

pub use guard::{DenyReason, GuardState, RouteGuard};
pub use roles::Role;
pub use session::{Session, SessionToken, TOKEN_KEY};
pub use user::CurrentUser;
