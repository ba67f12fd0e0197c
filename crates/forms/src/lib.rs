//! `ledgerdesk-forms`: headless form views.
//!
//! **Responsibility:** hold form drafts (persisted across restarts), validate
//! required fields into typed payloads, submit them through the API clients,
//! and expose which screen the host should render.
//!
//! Layout and styling belong to the host; nothing here draws.

pub mod fields;
pub mod form;
pub mod forms;

pub use fields::{FieldErrors, Validator};
pub use form::{FormModel, FormView, Screen, SubmitOutcome};
