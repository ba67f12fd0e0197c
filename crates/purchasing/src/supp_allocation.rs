//! Supplier allocations: a payment or credit applied against an invoice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::{RecordId, lenient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppAllocation {
    pub id: RecordId,
    /// Supplier the allocation belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amt: f64,
    pub date_alloc: NaiveDate,
    pub trans_no_from: RecordId,
    pub trans_type_from: RecordId,
    pub trans_no_to: RecordId,
    pub trans_type_to: RecordId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSuppAllocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<RecordId>,
    pub amt: f64,
    pub date_alloc: NaiveDate,
    pub trans_no_from: RecordId,
    pub trans_type_from: RecordId,
    pub trans_no_to: RecordId,
    pub trans_type_to: RecordId,
}
