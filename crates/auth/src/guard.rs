//! Role-based route guard.
//!
//! The guard starts in `Loading` while the current user is being fetched and
//! resolves to `Allowed` or `Denied` once the fetch settles.

use crate::{CurrentUser, Role};

/// Why navigation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No user could be fetched (signed out, or the fetch failed).
    NotSignedIn,
    /// The user's role is not among the allowed ones.
    RoleMismatch { role: Role },
}

impl core::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DenyReason::NotSignedIn => f.write_str("not signed in"),
            DenyReason::RoleMismatch { role } => write!(f, "role '{role}' may not open this page"),
        }
    }
}

/// Guard outcome as seen by the view layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GuardState {
    /// User fetch still pending: show a placeholder.
    #[default]
    Loading,
    /// Show the denial view.
    Denied(DenyReason),
    /// Render the nested routes.
    Allowed(CurrentUser),
}

impl GuardState {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardState::Allowed(_))
    }
}

/// Gate for a group of routes.
///
/// An empty role list admits any signed-in user.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Admit only users holding `role`.
    pub fn require(role: impl Into<Role>) -> Self {
        Self::new([role.into()])
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed
    }

    /// Decide once the user fetch has settled.
    pub fn evaluate(&self, user: Option<CurrentUser>) -> GuardState {
        let Some(user) = user else {
            return GuardState::Denied(DenyReason::NotSignedIn);
        };

        if self.allowed.is_empty() || self.allowed.iter().any(|r| user.has_role(r)) {
            GuardState::Allowed(user)
        } else {
            tracing::debug!(user = %user.username, role = %user.role, "route guard denied access");
            GuardState::Denied(DenyReason::RoleMismatch { role: user.role })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_core::RecordId;

    fn user(role: &'static str) -> CurrentUser {
        CurrentUser {
            id: RecordId::Int(1),
            username: "jdoe".into(),
            role: Role::new(role),
            real_name: None,
            email: None,
        }
    }

    #[test]
    fn pending_fetch_is_loading() {
        assert_eq!(GuardState::default(), GuardState::Loading);
    }

    #[test]
    fn missing_user_is_denied() {
        let guard = RouteGuard::require("admin");
        assert_eq!(guard.evaluate(None), GuardState::Denied(DenyReason::NotSignedIn));
    }

    #[test]
    fn role_mismatch_is_denied() {
        let guard = RouteGuard::require("admin");
        let state = guard.evaluate(Some(user("clerk")));
        assert_eq!(
            state,
            GuardState::Denied(DenyReason::RoleMismatch { role: Role::new("clerk") })
        );
    }

    #[test]
    fn matching_role_is_allowed() {
        let guard = RouteGuard::new([Role::new("admin"), Role::new("accountant")]);
        assert!(guard.evaluate(Some(user("accountant"))).is_allowed());
    }

    #[test]
    fn empty_role_list_admits_any_signed_in_user() {
        assert!(RouteGuard::default().evaluate(Some(user("clerk"))).is_allowed());
    }
}
