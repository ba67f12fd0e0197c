//! Audit trail entries (who touched which transaction, and when).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::RecordId;

/// One audit trail row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub id: RecordId,
    /// Transaction type code (the backend's `type` column).
    #[serde(rename = "type")]
    pub trans_type: RecordId,
    pub trans_no: RecordId,
    pub user: RecordId,
    /// Server timestamp, passed through as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl_seq: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for recording an audit trail entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuditTrail {
    #[serde(rename = "type")]
    pub trans_type: RecordId,
    pub trans_no: RecordId,
    pub user: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gl_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_column_maps_to_trans_type() {
        let raw = r#"{"id":1,"type":10,"trans_no":"5","user":2,"gl_date":"2024-03-31"}"#;
        let entry: AuditTrail = serde_json::from_str(raw).unwrap();

        assert_eq!(entry.trans_type, RecordId::Int(10));
        assert_eq!(entry.gl_date, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert!(entry.extra.is_empty());
    }
}
