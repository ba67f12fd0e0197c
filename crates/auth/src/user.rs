//! The signed-in user as reported by the backend.

use serde::{Deserialize, Serialize};

use ledgerdesk_core::RecordId;

use crate::Role;

/// Current user (`GET /api/user`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: RecordId,
    #[serde(alias = "user_id")]
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CurrentUser {
    pub fn has_role(&self, role: &Role) -> bool {
        &self.role == role
    }
}
