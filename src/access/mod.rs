//! Access control
//!
//! Decides whether a back-office actor may see a protected region. Decisions are
//! values: a refusal is an [`AccessDecision::Deny`] carrying a [`Denial`] the caller can
//! render, never an error.

use thiserror::Error;

mod actor;
mod decision;
mod gate;
mod navigation;
mod permissions;
mod requirement;
mod roles;

pub use actor::ActorAuthorization;
pub use decision::{AccessDecision, Denial, DenialReason};
pub use gate::{authorize, evaluate};
pub use navigation::{NavigationEntry, Protected, admin_navigation, filter_permitted};
pub use permissions::Permission;
pub use requirement::{AccessRequirement, PermissionList};
pub use roles::Role;

/// Errors raised while parsing roles and permissions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Unrecognised role name
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Unrecognised permission name
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
}
