use ledgerdesk_core::RecordId;
use ledgerdesk_parties::{CrmContact, CrmPerson, NewCrmContact, NewCrmPerson};

use crate::{Fetched, Resource, ResourceClient};

/// `/api/crm-persons`
pub struct CrmPersonsApi;

impl Resource for CrmPersonsApi {
    const NAME: &'static str = "crm person";
    const PATH: &'static str = "/api/crm-persons";

    type Record = CrmPerson;
    type Payload = NewCrmPerson;
}

/// `/api/crm-contacts`
pub struct CrmContactsApi;

impl Resource for CrmContactsApi {
    const NAME: &'static str = "crm contact";
    const PATH: &'static str = "/api/crm-contacts";

    type Record = CrmContact;
    type Payload = NewCrmContact;
}

pub type CrmPersonClient = ResourceClient<CrmPersonsApi>;
pub type CrmContactClient = ResourceClient<CrmContactsApi>;

impl ResourceClient<CrmContactsApi> {
    /// Contacts linking a person to entity `entity_id` of kind `contact_type`.
    pub async fn by_entity(&self, contact_type: &str, entity_id: impl Into<RecordId>) -> Fetched<Vec<CrmContact>> {
        let entity_id = entity_id.into();
        self.list()
            .await
            .retain(|c| c.contact_type == contact_type && c.entity_id.loosely_eq(&entity_id))
    }

    /// Contacts of one person.
    pub async fn by_person(&self, person_id: impl Into<RecordId>) -> Fetched<Vec<CrmContact>> {
        self.filter_by(&person_id.into(), |c| Some(&c.person_id)).await
    }
}
