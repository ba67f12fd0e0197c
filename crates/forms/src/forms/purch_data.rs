//! Purchasing data form.

use serde::{Deserialize, Serialize};

use ledgerdesk_core::RecordId;
use ledgerdesk_purchasing::{NewPurchData, PurchData};

use crate::{FieldErrors, FormModel, Validator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchDataForm {
    pub supplier_id: String,
    pub stock_id: String,
    pub price: String,
    pub suppliers_uom: String,
    pub conversion_factor: String,
    pub supplier_description: String,
}

impl Default for PurchDataForm {
    fn default() -> Self {
        Self {
            supplier_id: String::new(),
            stock_id: String::new(),
            price: String::new(),
            suppliers_uom: String::new(),
            conversion_factor: "1".to_string(),
            supplier_description: String::new(),
        }
    }
}

impl PurchDataForm {
    pub fn from_record(row: &PurchData) -> Self {
        Self {
            supplier_id: row.supplier_id.to_string(),
            stock_id: row.stock_id.to_string(),
            price: row.price.to_string(),
            suppliers_uom: row.suppliers_uom.clone(),
            conversion_factor: row.conversion_factor.to_string(),
            supplier_description: row.supplier_description.clone().unwrap_or_default(),
        }
    }
}

impl FormModel for PurchDataForm {
    const KEY: &'static str = "purch_data_form";
    const TITLE: &'static str = "Purchasing data";

    type Payload = NewPurchData;

    fn validate(&self) -> Result<NewPurchData, FieldErrors> {
        let mut v = Validator::new();

        let supplier_id = v.id("supplier_id", &self.supplier_id);
        // Item codes are kept verbatim: "007" is not item 7.
        let stock_id = v.required("stock_id", &self.stock_id).map(RecordId::Text);
        let price = v.non_negative("price", &self.price);
        let suppliers_uom = v.required("suppliers_uom", &self.suppliers_uom);
        let conversion_factor = v.positive("conversion_factor", &self.conversion_factor);

        match (supplier_id, stock_id, price, suppliers_uom, conversion_factor) {
            (Some(supplier_id), Some(stock_id), Some(price), Some(suppliers_uom), Some(conversion_factor)) => {
                Ok(NewPurchData {
                    supplier_id,
                    stock_id,
                    price,
                    suppliers_uom,
                    conversion_factor,
                    supplier_description: Validator::optional(&self.supplier_description),
                })
            }
            _ => Err(v.into_errors()),
        }
    }
}
