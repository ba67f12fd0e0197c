use ledgerdesk_accounting::{AuditTrail, NewAuditTrail};
use ledgerdesk_core::RecordId;

use crate::{Fetched, Resource, ResourceClient};

/// `/api/audit-trails`
pub struct AuditTrailsApi;

impl Resource for AuditTrailsApi {
    const NAME: &'static str = "audit trail";
    const PATH: &'static str = "/api/audit-trails";

    type Record = AuditTrail;
    type Payload = NewAuditTrail;
}

pub type AuditTrailClient = ResourceClient<AuditTrailsApi>;

impl ResourceClient<AuditTrailsApi> {
    /// Entries for one transaction type.
    pub async fn by_trans_type(&self, trans_type: impl Into<RecordId>) -> Fetched<Vec<AuditTrail>> {
        self.filter_by(&trans_type.into(), |row| Some(&row.trans_type)).await
    }

    /// Entries for one transaction (type + number).
    pub async fn for_transaction(
        &self,
        trans_type: impl Into<RecordId>,
        trans_no: impl Into<RecordId>,
    ) -> Fetched<Vec<AuditTrail>> {
        let trans_no = trans_no.into();
        self.by_trans_type(trans_type)
            .await
            .retain(|row| row.trans_no.loosely_eq(&trans_no))
    }
}
