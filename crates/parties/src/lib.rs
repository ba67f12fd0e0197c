//! CRM persons and their links to customers, branches and suppliers.

pub mod crm;

pub use crm::{contact_kind, CrmContact, CrmPerson, NewCrmContact, NewCrmPerson};
