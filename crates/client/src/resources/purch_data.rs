use ledgerdesk_core::RecordId;
use ledgerdesk_purchasing::{NewPurchData, PurchData};

use crate::{Fetched, Resource, ResourceClient};

/// `/api/purch-data`
pub struct PurchDataApi;

impl Resource for PurchDataApi {
    const NAME: &'static str = "purchasing data";
    const PATH: &'static str = "/api/purch-data";

    type Record = PurchData;
    type Payload = NewPurchData;
}

pub type PurchDataClient = ResourceClient<PurchDataApi>;

impl ResourceClient<PurchDataApi> {
    /// Purchasing data offered by one supplier.
    pub async fn by_supplier(&self, supplier_id: impl Into<RecordId>) -> Fetched<Vec<PurchData>> {
        self.filter_by(&supplier_id.into(), |row| Some(&row.supplier_id)).await
    }

    /// Purchasing data for one stock item, across suppliers.
    pub async fn by_stock_item(&self, stock_id: impl Into<RecordId>) -> Fetched<Vec<PurchData>> {
        self.filter_by(&stock_id.into(), |row| Some(&row.stock_id)).await
    }
}
