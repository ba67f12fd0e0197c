use ledgerdesk_accounting::{GlType, NewGlType};

use crate::{Resource, ResourceClient};

/// `/api/gl-types`
pub struct GlTypesApi;

impl Resource for GlTypesApi {
    const NAME: &'static str = "gl type";
    const PATH: &'static str = "/api/gl-types";

    type Record = GlType;
    type Payload = NewGlType;
}

pub type GlTypeClient = ResourceClient<GlTypesApi>;
