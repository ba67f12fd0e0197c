//! Concrete forms, one per screen.

pub mod currency_revaluation;
pub mod customer_contact;
pub mod gl_type;
pub mod login;
pub mod purch_data;
pub mod supp_allocation;
pub mod wo_issue;

pub use currency_revaluation::CurrencyRevaluationForm;
pub use customer_contact::{CustomerContactForm, CustomerContactPayload};
pub use gl_type::GlTypeForm;
pub use login::LoginForm;
pub use purch_data::PurchDataForm;
pub use supp_allocation::SuppAllocationForm;
pub use wo_issue::{IssueLine, IssueLineDraft, SavedIssue, WoIssueForm, WoIssuePayload};
