use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::{RecordId, lenient};

/// Values of [`CrmContact::contact_type`] used by the backend.
pub mod contact_kind {
    pub const CUSTOMER: &str = "customer";
    pub const CUSTOMER_BRANCH: &str = "cust_branch";
    pub const SUPPLIER: &str = "supplier";
}

/// A CRM person (a contact's name, phones, address).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmPerson {
    pub id: RecordId,
    /// Short reference shown in pickers.
    #[serde(rename = "ref", default, deserialize_with = "lenient::text")]
    pub reference: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub inactive: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewCrmPerson {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Link between a CRM person and an entity (customer, branch, supplier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmContact {
    pub id: RecordId,
    pub person_id: RecordId,
    /// Kind of entity linked, see [`contact_kind`].
    #[serde(rename = "type")]
    pub contact_type: String,
    /// Role of the person for that entity (`general`, `invoice`, ...).
    #[serde(default, deserialize_with = "lenient::text")]
    pub action: String,
    pub entity_id: RecordId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCrmContact {
    pub person_id: RecordId,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub action: String,
    pub entity_id: RecordId,
}

impl CrmContact {
    /// Whether this contact links a person to customer branch `branch_id`.
    pub fn is_for_branch(&self, branch_id: &RecordId) -> bool {
        self.contact_type == contact_kind::CUSTOMER_BRANCH && self.entity_id.loosely_eq(branch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(kind: &str, entity: RecordId) -> CrmContact {
        CrmContact {
            id: RecordId::Int(1),
            person_id: RecordId::Int(9),
            contact_type: kind.to_string(),
            action: "general".into(),
            entity_id: entity,
            extra: Map::new(),
        }
    }

    #[test]
    fn branch_match_requires_kind_and_entity() {
        let branch = RecordId::Int(4);
        assert!(contact(contact_kind::CUSTOMER_BRANCH, RecordId::from("4")).is_for_branch(&branch));
        assert!(!contact(contact_kind::CUSTOMER, RecordId::Int(4)).is_for_branch(&branch));
        assert!(!contact(contact_kind::CUSTOMER_BRANCH, RecordId::Int(5)).is_for_branch(&branch));
    }

    #[test]
    fn ref_column_maps_to_reference() {
        let person: CrmPerson =
            serde_json::from_str(r#"{"id":"9","ref":"JD","name":"Jane Doe","inactive":false}"#).unwrap();
        assert_eq!(person.reference, "JD");
        assert_eq!(person.email, None);
    }

    #[test]
    fn null_action_and_tinyint_flag_decode() {
        let contact: CrmContact =
            serde_json::from_str(r#"{"id":1,"person_id":9,"type":"cust_branch","action":null,"entity_id":"4"}"#).unwrap();
        assert_eq!(contact.action, "");

        let person: CrmPerson = serde_json::from_str(r#"{"id":9,"ref":"JD","name":"Jane Doe","inactive":1}"#).unwrap();
        assert!(person.inactive);
    }
}
