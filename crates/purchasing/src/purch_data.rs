use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ledgerdesk_core::{RecordId, lenient};

/// Purchasing data: what a supplier charges for a stock item, in the
/// supplier's unit of measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub supplier_id: RecordId,
    pub stock_id: RecordId,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub suppliers_uom: String,
    /// Supplier units per stock unit.
    #[serde(default, deserialize_with = "lenient::number")]
    pub conversion_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating or updating purchasing data.
///
/// `supplier_id`, `stock_id`, `price`, `suppliers_uom` and `conversion_factor`
/// are required by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchData {
    pub supplier_id: RecordId,
    pub stock_id: RecordId,
    pub price: f64,
    pub suppliers_uom: String,
    pub conversion_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_description: Option<String>,
}

impl PurchData {
    /// Price per stock unit.
    pub fn unit_price(&self) -> Option<f64> {
        (self.conversion_factor != 0.0).then(|| self.price / self.conversion_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_text_supplier_ids() {
        let raw = r#"[
            {"supplier_id":7,"stock_id":"BOLT","price":2.5,"suppliers_uom":"box","conversion_factor":10},
            {"supplier_id":"7","stock_id":"NUT","price":1,"suppliers_uom":"ea","conversion_factor":1}
        ]"#;
        let rows: Vec<PurchData> = serde_json::from_str(raw).unwrap();

        assert!(rows[0].supplier_id.loosely_eq(&rows[1].supplier_id));
        assert_eq!(rows[0].unit_price(), Some(0.25));
        assert_eq!(rows[1].id, None);
    }

    #[test]
    fn optional_description_is_omitted_from_payloads() {
        let payload = NewPurchData {
            supplier_id: RecordId::Int(3),
            stock_id: RecordId::from("BOLT"),
            price: 4.0,
            suppliers_uom: "box".into(),
            conversion_factor: 12.0,
            supplier_description: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("supplier_description").is_none());
        assert_eq!(json["supplier_id"], 3);
    }

    #[test]
    fn decimal_strings_are_read_as_numbers() {
        let row: PurchData = serde_json::from_str(
            r#"{"supplier_id":7,"stock_id":"BOLT","price":"2.5000","suppliers_uom":null,"conversion_factor":"10"}"#,
        )
        .unwrap();
        assert_eq!(row.price, 2.5);
        assert_eq!(row.conversion_factor, 10.0);
        assert_eq!(row.suppliers_uom, "");
    }
}
