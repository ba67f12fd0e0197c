//! GL account type form.

use serde::{Deserialize, Serialize};

use ledgerdesk_accounting::{GlType, NewGlType};

use crate::{FieldErrors, FormModel, Validator};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlTypeForm {
    pub id: String,
    pub name: String,
    pub class_id: String,
    /// Parent type; blank for a top-level type.
    pub parent: String,
    pub inactive: bool,
}

impl GlTypeForm {
    pub fn from_record(gl: &GlType) -> Self {
        Self {
            id: gl.id.to_string(),
            name: gl.name.clone(),
            class_id: gl.class_id.as_ref().map(ToString::to_string).unwrap_or_default(),
            parent: gl.parent.as_ref().map(ToString::to_string).unwrap_or_default(),
            inactive: gl.inactive,
        }
    }
}

impl FormModel for GlTypeForm {
    const KEY: &'static str = "gl_type_form";
    const TITLE: &'static str = "GL account type";

    type Payload = NewGlType;

    fn validate(&self) -> Result<NewGlType, FieldErrors> {
        let mut v = Validator::new();

        let id = v.id("id", &self.id);
        let name = v.required("name", &self.name);
        let class_id = v.id("class_id", &self.class_id);
        let parent = v.optional_id("parent", &self.parent);

        if let (Some(id), Some(Some(parent))) = (&id, &parent) {
            v.ensure("parent", !id.loosely_eq(parent), "a type cannot be its own parent");
        }
        if !v.is_valid() {
            return Err(v.into_errors());
        }

        match (id, name, class_id, parent) {
            (Some(id), Some(name), Some(class_id), Some(parent)) => Ok(NewGlType {
                id,
                name,
                class_id,
                parent,
                inactive: self.inactive,
            }),
            _ => Err(v.into_errors()),
        }
    }
}
