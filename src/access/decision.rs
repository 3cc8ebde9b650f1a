//! Access decisions

use std::fmt;

use super::{Permission, Role, requirement::PermissionList};

/// Which check refused access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// Nobody is signed in.
    Unauthenticated,

    /// The signed-in account is disabled.
    Inactive,

    /// The actor has a different role than required.
    RoleMismatch {
        /// Required role
        required: Role,
        /// Actor's role
        actual: Role,
    },

    /// The actor lacks the single required permission.
    MissingPermission(Permission),

    /// The actor does not satisfy the permission group.
    MissingPermissions {
        /// Permissions listed by the requirement
        required: PermissionList,
        /// Required permissions the actor lacks
        missing: PermissionList,
        /// Whether all were needed, rather than any one
        require_all: bool,
    },
}

/// Structured explanation of a refusal, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    reason: DenialReason,
    labels: Vec<String>,
}

impl Denial {
    /// Build a denial, deriving the labels of whatever is missing.
    pub fn new(reason: DenialReason) -> Self {
        let labels = match &reason {
            DenialReason::Unauthenticated | DenialReason::Inactive => Vec::new(),
            DenialReason::RoleMismatch { required, .. } => vec![required.label()],
            DenialReason::MissingPermission(permission) => vec![permission.label()],
            DenialReason::MissingPermissions { missing, .. } => {
                missing.iter().copied().map(Permission::label).collect()
            }
        };

        Self { reason, labels }
    }

    /// Check that failed.
    pub fn reason(&self) -> &DenialReason {
        &self.reason
    }

    /// Human-readable names of the missing role or permissions.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// One-sentence explanation for the actor.
    pub fn message(&self) -> &'static str {
        match &self.reason {
            DenialReason::Unauthenticated => "You need to sign in to access this section.",
            DenialReason::Inactive => "Your account is disabled.",
            DenialReason::RoleMismatch { .. } => {
                "You do not have the role required to access this section."
            }
            DenialReason::MissingPermission(_) => {
                "You do not have permission to access this section."
            }
            DenialReason::MissingPermissions {
                require_all: true, ..
            } => "All of the listed permissions are required to access this section.",
            DenialReason::MissingPermissions {
                require_all: false,
                ..
            } => "At least one of the listed permissions is required to access this section.",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;

        if !self.labels.is_empty() {
            write!(f, " Missing: {}", self.labels.join(", "))?;
        }

        Ok(())
    }
}

/// Result of evaluating a requirement. Denial is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the protected content.
    Allow,

    /// Render the explanation instead.
    Deny(Denial),
}

impl AccessDecision {
    /// Deny for `reason`.
    pub fn deny(reason: DenialReason) -> Self {
        Self::Deny(Denial::new(reason))
    }

    /// Whether access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The denial, if access was refused.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Allow => None,
            Self::Deny(denial) => Some(denial),
        }
    }
}
