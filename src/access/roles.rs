//! Roles

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::AccessError;

/// Back-office role. Roles are compared for equality only; [`Role::rank`] is for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Unrestricted operator
    SuperAdmin,

    /// Platform administrator
    Admin,

    /// Restaurant or operations manager
    Manager,

    /// Customer support agent
    Support,
}

impl Role {
    /// Every role, highest rank first.
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Manager, Role::Support];

    /// Wire name, e.g. `SUPER_ADMIN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Support => "SUPPORT",
        }
    }

    /// Human-readable name, e.g. `super admin`.
    pub fn label(self) -> String {
        label_of(self.as_str())
    }

    /// Display rank, 1 being the highest.
    pub fn rank(self) -> u8 {
        match self {
            Self::SuperAdmin => 1,
            Self::Admin => 2,
            Self::Manager => 3,
            Self::Support => 4,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace([' ', '-'], "_");

        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

pub(super) fn label_of(wire: &str) -> String {
    wire.replace('_', " ").to_lowercase()
}
