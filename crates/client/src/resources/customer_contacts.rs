//! Customer contacts: CRM persons linked to customer branches.
//!
//! The backend offers no joined endpoint, so a branch lookup lists every CRM
//! contact, keeps the branch links, and fetches each linked person on its own
//! request. A [`PersonCache`] lets repeated lookups skip persons already seen.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use ledgerdesk_core::RecordId;
use ledgerdesk_parties::{contact_kind, CrmContact, CrmPerson, NewCrmContact, NewCrmPerson};

use crate::resources::crm::{CrmContactClient, CrmPersonClient};
use crate::{ApiError, Fetched, HttpClient};

/// Client-side join cache of CRM persons keyed by id. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct PersonCache {
    persons: Arc<RwLock<HashMap<String, CrmPerson>>>,
}

impl PersonCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &RecordId) -> Option<CrmPerson> {
        self.persons.read().ok()?.get(&id.as_path_segment()).cloned()
    }

    pub fn insert(&self, person: CrmPerson) {
        if let Ok(mut persons) = self.persons.write() {
            persons.insert(person.id.as_path_segment(), person);
        }
    }

    pub fn invalidate(&self, id: &RecordId) {
        if let Ok(mut persons) = self.persons.write() {
            persons.remove(&id.as_path_segment());
        }
    }

    pub fn len(&self) -> usize {
        self.persons.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A newly created branch contact: the person and the link row.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchContact {
    pub person: CrmPerson,
    pub contact: CrmContact,
}

/// Contact lookups and creation for customer branches.
#[derive(Debug, Clone)]
pub struct CustomerContactClient {
    persons: CrmPersonClient,
    contacts: CrmContactClient,
    cache: Option<PersonCache>,
}

impl CustomerContactClient {
    pub fn new(http: HttpClient) -> Self {
        Self {
            persons: CrmPersonClient::new(http.clone()),
            contacts: CrmContactClient::new(http),
            cache: None,
        }
    }

    /// Reuse persons across lookups through `cache`.
    pub fn with_cache(mut self, cache: PersonCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Persons linked to customer branch `branch_id`.
    ///
    /// One request for the contact list, then one per matching contact.
    /// Persons that fail to load are skipped; a failed contact list is
    /// reported as `Failed`.
    pub async fn contacts_by_branch(&self, branch_id: impl Into<RecordId>) -> Fetched<Vec<CrmPerson>> {
        let branch_id = branch_id.into();

        let links = match self.contacts.list().await {
            Fetched::Loaded(contacts) => contacts
                .into_iter()
                .filter(|c| c.is_for_branch(&branch_id))
                .collect::<Vec<_>>(),
            Fetched::Empty => return Fetched::Empty,
            Fetched::Failed(err) => return Fetched::Failed(err),
        };

        let mut persons = Vec::with_capacity(links.len());
        for link in links {
            if let Some(person) = self.person(&link.person_id).await {
                persons.push(person);
            }
        }

        Fetched::from_items(persons)
    }

    async fn person(&self, id: &RecordId) -> Option<CrmPerson> {
        if let Some(person) = self.cache.as_ref().and_then(|c| c.get(id)) {
            return Some(person);
        }

        match self.persons.get_by_id(id).await {
            Fetched::Loaded(person) => {
                if let Some(cache) = &self.cache {
                    cache.insert(person.clone());
                }
                Some(person)
            }
            Fetched::Empty => {
                tracing::warn!(person_id = %id, "contact references a missing person; skipping");
                None
            }
            Fetched::Failed(err) => {
                tracing::warn!(person_id = %id, "failed to load contact person; skipping: {err}");
                None
            }
        }
    }

    /// Create a person and link it to customer branch `branch_id`.
    pub async fn create_for_branch(
        &self,
        person: &NewCrmPerson,
        branch_id: impl Into<RecordId>,
        action: impl Into<String>,
    ) -> Result<BranchContact, ApiError> {
        let person = self.persons.create(person).await?;

        let link = NewCrmContact {
            person_id: person.id.clone(),
            contact_type: contact_kind::CUSTOMER_BRANCH.to_string(),
            action: action.into(),
            entity_id: branch_id.into(),
        };
        let contact = self.contacts.create(&link).await?;

        if let Some(cache) = &self.cache {
            cache.insert(person.clone());
        }

        Ok(BranchContact { person, contact })
    }

    /// Update a contact person; the cache entry is refreshed.
    pub async fn update_person(&self, id: impl Into<RecordId>, person: &NewCrmPerson) -> Result<CrmPerson, ApiError> {
        let id = id.into();
        let updated = self.persons.update(id.clone(), person).await?;
        if let Some(cache) = &self.cache {
            cache.invalidate(&id);
            cache.insert(updated.clone());
        }
        Ok(updated)
    }
}
