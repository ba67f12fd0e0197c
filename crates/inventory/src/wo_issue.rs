//! Work-order issues.
//!
//! An issue moves stock from a location into a work order; each issue has
//! one or more item lines linked back through `issue_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::{RecordId, lenient};

/// Issue header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoIssue {
    pub issue_no: RecordId,
    pub workorder_id: RecordId,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reference: String,
    pub issue_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::text")]
    pub loc_code: String,
    pub workcentre_id: RecordId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWoIssue {
    pub workorder_id: RecordId,
    pub reference: String,
    pub issue_date: NaiveDate,
    pub loc_code: String,
    pub workcentre_id: RecordId,
}

/// One stock line of an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WoIssueItem {
    pub id: RecordId,
    pub stock_id: RecordId,
    /// The owning issue's `issue_no`.
    pub issue_id: RecordId,
    #[serde(default, deserialize_with = "lenient::number")]
    pub qty_issued: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub unit_cost: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWoIssueItem {
    pub stock_id: RecordId,
    pub issue_id: RecordId,
    pub qty_issued: f64,
    #[serde(default)]
    pub unit_cost: f64,
}

impl WoIssueItem {
    pub fn line_cost(&self) -> f64 {
        self.qty_issued * self.unit_cost
    }
}
