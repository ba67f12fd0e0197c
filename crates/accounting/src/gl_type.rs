use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::{RecordId, lenient};

/// GL account type (a node of the chart of accounts' type tree).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlType {
    pub id: RecordId,
    pub name: String,
    /// Account class this type belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<RecordId>,
    /// Parent type, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub inactive: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating or updating a GL type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGlType {
    pub id: RecordId,
    pub name: String,
    pub class_id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<RecordId>,
    #[serde(default)]
    pub inactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_fields_survive_a_round_trip() {
        let raw = r#"{"id":"10","name":"Current Assets","class_id":1,"parent":"-1","sort":3}"#;
        let gl: GlType = serde_json::from_str(raw).unwrap();

        assert_eq!(gl.class_id, Some(RecordId::Int(1)));
        assert!(!gl.inactive);
        assert_eq!(gl.extra.get("sort"), Some(&Value::from(3)));

        let back = serde_json::to_value(&gl).unwrap();
        assert_eq!(back["sort"], 3);
        assert_eq!(back["id"], "10");
    }

    #[test]
    fn tinyint_inactive_flag_is_read_as_bool() {
        let rows: Vec<GlType> = serde_json::from_str(
            r#"[{"id":1,"name":"Assets","class_id":1,"inactive":0},{"id":2,"name":"Old","inactive":"1"}]"#,
        )
        .unwrap();
        assert!(!rows[0].inactive);
        assert!(rows[1].inactive);
    }
}
