use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::RecordId;

/// How tax is applied to a price (e.g. "taxes added", "taxes included").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxAlgorithm {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaxAlgorithm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
