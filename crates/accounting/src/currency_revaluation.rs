//! Currency revaluation runs.
//!
//! A revaluation re-values open foreign-currency balances as of a date; the
//! backend posts the resulting journal and records the run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::RecordId;

/// A recorded revaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRevaluation {
    pub id: RecordId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request to revalue balances as of `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevaluationRequest {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}
