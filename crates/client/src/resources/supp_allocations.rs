use ledgerdesk_core::RecordId;
use ledgerdesk_purchasing::{NewSuppAllocation, SuppAllocation};

use crate::{Fetched, Resource, ResourceClient};

/// `/api/supp-allocations`
pub struct SuppAllocationsApi;

impl Resource for SuppAllocationsApi {
    const NAME: &'static str = "supplier allocation";
    const PATH: &'static str = "/api/supp-allocations";

    type Record = SuppAllocation;
    type Payload = NewSuppAllocation;
}

pub type SuppAllocationClient = ResourceClient<SuppAllocationsApi>;

impl ResourceClient<SuppAllocationsApi> {
    /// Allocations recorded for one supplier. Rows without a supplier never match.
    pub async fn by_supplier(&self, supplier_id: impl Into<RecordId>) -> Fetched<Vec<SuppAllocation>> {
        self.filter_by(&supplier_id.into(), |row| row.person_id.as_ref()).await
    }
}
