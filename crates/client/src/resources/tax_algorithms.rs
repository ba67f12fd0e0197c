use ledgerdesk_accounting::{NewTaxAlgorithm, TaxAlgorithm};

use crate::{Resource, ResourceClient};

/// `/api/tax-algorithms`
pub struct TaxAlgorithmsApi;

impl Resource for TaxAlgorithmsApi {
    const NAME: &'static str = "tax algorithm";
    const PATH: &'static str = "/api/tax-algorithms";

    type Record = TaxAlgorithm;
    type Payload = NewTaxAlgorithm;
}

pub type TaxAlgorithmClient = ResourceClient<TaxAlgorithmsApi>;
