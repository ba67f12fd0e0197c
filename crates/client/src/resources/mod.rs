//! Per-resource clients.
//!
//! Each module declares the resource marker (path, record, payload), a type
//! alias for its client, and any derived lookups.

pub mod audit_trails;
pub mod crm;
pub mod currency_revaluations;
pub mod customer_contacts;
pub mod gl_types;
pub mod purch_data;
pub mod supp_allocations;
pub mod tax_algorithms;
pub mod wo_issues;

pub use audit_trails::{AuditTrailClient, AuditTrailsApi};
pub use crm::{CrmContactClient, CrmContactsApi, CrmPersonClient, CrmPersonsApi};
pub use currency_revaluations::{CurrencyRevaluationClient, CurrencyRevaluationsApi};
pub use customer_contacts::{BranchContact, CustomerContactClient, PersonCache};
pub use gl_types::{GlTypeClient, GlTypesApi};
pub use purch_data::{PurchDataApi, PurchDataClient};
pub use supp_allocations::{SuppAllocationClient, SuppAllocationsApi};
pub use tax_algorithms::{TaxAlgorithmClient, TaxAlgorithmsApi};
pub use wo_issues::{WoIssueClient, WoIssueItemClient, WoIssueItemsApi, WoIssuesApi};
