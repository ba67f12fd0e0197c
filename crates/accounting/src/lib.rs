//! Accounting records (banking/GL) exchanged with the backend.

pub mod audit_trail;
pub mod currency_revaluation;
pub mod gl_type;
pub mod tax_algorithm;

pub use audit_trail::{AuditTrail, NewAuditTrail};
pub use currency_revaluation::{CurrencyRevaluation, RevaluationRequest};
pub use gl_type::{GlType, NewGlType};
pub use tax_algorithm::{NewTaxAlgorithm, TaxAlgorithm};
