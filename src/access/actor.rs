//! Actors

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{Permission, Role};

/// Role, permissions and status of the signed-in back-office user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAuthorization {
    /// Assigned role
    pub role: Role,

    /// Granted permissions
    #[serde(default)]
    pub permissions: FxHashSet<Permission>,

    /// Whether the account is enabled
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl ActorAuthorization {
    /// Create an active actor.
    pub fn new(role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            role,
            permissions: permissions.into_iter().collect(),
            is_active: true,
        }
    }

    /// Mark the account as disabled.
    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether the actor has exactly `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Whether the actor holds `permission`.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Whether the actor holds at least one of `permissions`. False for an empty list.
    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.permissions.contains(p))
    }

    /// Whether the actor holds every one of `permissions`. True for an empty list.
    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.permissions.contains(p))
    }
}
