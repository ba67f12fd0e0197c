//! Customer branch contact form: a CRM person plus its branch link.

use serde::{Deserialize, Serialize};

use ledgerdesk_client::resources::{BranchContact, CustomerContactClient};
use ledgerdesk_core::RecordId;
use ledgerdesk_parties::{CrmPerson, NewCrmPerson};

use crate::{FieldErrors, FormModel, FormView, SubmitOutcome, Validator};

/// Link action used when none is chosen.
pub const DEFAULT_ACTION: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerContactForm {
    pub branch_id: String,
    pub action: String,
    pub reference: String,
    pub name: String,
    pub name2: String,
    pub address: String,
    pub phone: String,
    pub phone2: String,
    pub fax: String,
    pub email: String,
    pub lang: String,
    pub notes: String,
}

impl Default for CustomerContactForm {
    fn default() -> Self {
        Self {
            branch_id: String::new(),
            action: DEFAULT_ACTION.to_string(),
            reference: String::new(),
            name: String::new(),
            name2: String::new(),
            address: String::new(),
            phone: String::new(),
            phone2: String::new(),
            fax: String::new(),
            email: String::new(),
            lang: String::new(),
            notes: String::new(),
        }
    }
}

impl CustomerContactForm {
    /// Blank form for a new contact of `branch_id`.
    pub fn for_branch(branch_id: impl Into<RecordId>) -> Self {
        Self {
            branch_id: branch_id.into().to_string(),
            ..Self::default()
        }
    }

    pub fn from_person(branch_id: impl Into<RecordId>, person: &CrmPerson) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            reference: person.reference.clone(),
            name: person.name.clone(),
            name2: text(&person.name2),
            address: text(&person.address),
            phone: text(&person.phone),
            phone2: text(&person.phone2),
            fax: text(&person.fax),
            email: text(&person.email),
            lang: text(&person.lang),
            notes: text(&person.notes),
            ..Self::for_branch(branch_id)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerContactPayload {
    pub branch_id: RecordId,
    pub action: String,
    pub person: NewCrmPerson,
}

fn looks_like_email(raw: &str) -> bool {
    match raw.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

impl FormModel for CustomerContactForm {
    const KEY: &'static str = "customer_contact_form";
    const TITLE: &'static str = "Contact";

    type Payload = CustomerContactPayload;

    fn validate(&self) -> Result<CustomerContactPayload, FieldErrors> {
        let mut v = Validator::new();

        let branch_id = v.id("branch_id", &self.branch_id);
        let reference = v.required("reference", &self.reference);
        let name = v.required("name", &self.name);
        let email = Validator::optional(&self.email);
        if let Some(email) = &email {
            v.ensure("email", looks_like_email(email), "is not a valid email address");
        }
        let action = Validator::optional(&self.action).unwrap_or_else(|| DEFAULT_ACTION.to_string());

        match (branch_id, reference, name) {
            (Some(branch_id), Some(reference), Some(name)) if v.is_valid() => Ok(CustomerContactPayload {
                branch_id,
                action,
                person: NewCrmPerson {
                    reference,
                    name,
                    name2: Validator::optional(&self.name2),
                    address: Validator::optional(&self.address),
                    phone: Validator::optional(&self.phone),
                    phone2: Validator::optional(&self.phone2),
                    fax: Validator::optional(&self.fax),
                    email,
                    lang: Validator::optional(&self.lang),
                    notes: Validator::optional(&self.notes),
                },
            }),
            _ => Err(v.into_errors()),
        }
    }
}

impl FormView<CustomerContactForm> {
    /// Create the person and link it to the branch.
    pub async fn save(&mut self, client: &CustomerContactClient) -> SubmitOutcome<BranchContact> {
        self.submit(|payload| async move {
            client
                .create_for_branch(&payload.person, payload.branch_id, payload.action)
                .await
        })
        .await
    }
}
