//! Access requirements

use smallvec::SmallVec;

use super::{Permission, Role};

/// Permissions listed by a requirement; rarely more than a handful.
pub type PermissionList = SmallVec<[Permission; 4]>;

/// Rule attached to a protected region. The default requirement admits everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    /// Exact role the actor must have
    pub required_role: Option<Role>,

    /// Single permission the actor must hold
    pub required_permission: Option<Permission>,

    /// Permissions checked as a group; see `require_all`
    pub required_permissions: PermissionList,

    /// Whether every permission in `required_permissions` is needed, rather than any one
    pub require_all: bool,
}

impl AccessRequirement {
    /// Requirement that admits every actor.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require exactly `role`.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Require `permission`.
    #[must_use]
    pub fn permission(mut self, permission: Permission) -> Self {
        self.required_permission = Some(permission);
        self
    }

    /// Require at least one of `permissions`.
    #[must_use]
    pub fn any_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions = permissions.into_iter().collect();
        self.require_all = false;
        self
    }

    /// Require all of `permissions`.
    #[must_use]
    pub fn all_of(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions = permissions.into_iter().collect();
        self.require_all = true;
        self
    }

    /// Whether no field restricts access.
    pub fn is_unrestricted(&self) -> bool {
        self.required_role.is_none()
            && self.required_permission.is_none()
            && self.required_permissions.is_empty()
    }
}
