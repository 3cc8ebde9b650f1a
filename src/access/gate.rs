//! Access gate

use tracing::debug;

use super::{
    AccessDecision, AccessRequirement, ActorAuthorization, DenialReason,
    requirement::PermissionList,
};

/// Evaluate `requirement` against `actor`. The first failing check wins:
/// role, then single permission, then the permission group.
///
/// This does not look at [`ActorAuthorization::is_active`]; use [`authorize`] for
/// requests coming from a session.
pub fn evaluate(actor: &ActorAuthorization, requirement: &AccessRequirement) -> AccessDecision {
    if let Some(required) = requirement.required_role
        && !actor.has_role(required)
    {
        return AccessDecision::deny(DenialReason::RoleMismatch {
            required,
            actual: actor.role,
        });
    }

    if let Some(permission) = requirement.required_permission
        && !actor.has_permission(permission)
    {
        return AccessDecision::deny(DenialReason::MissingPermission(permission));
    }

    let group = &requirement.required_permissions;

    if !group.is_empty() {
        let satisfied = if requirement.require_all {
            actor.has_all_permissions(group)
        } else {
            actor.has_any_permission(group)
        };

        if !satisfied {
            let missing: PermissionList = group
                .iter()
                .copied()
                .filter(|permission| !actor.has_permission(*permission))
                .collect();

            return AccessDecision::deny(DenialReason::MissingPermissions {
                required: group.clone(),
                missing,
                require_all: requirement.require_all,
            });
        }
    }

    AccessDecision::Allow
}

/// Evaluate a request from the current session. Nobody signed in, or a disabled
/// account, is refused before the requirement is looked at.
pub fn authorize(
    actor: Option<&ActorAuthorization>,
    requirement: &AccessRequirement,
) -> AccessDecision {
    let decision = match actor {
        None => AccessDecision::deny(DenialReason::Unauthenticated),
        Some(actor) if !actor.is_active => AccessDecision::deny(DenialReason::Inactive),
        Some(actor) => evaluate(actor, requirement),
    };

    if let AccessDecision::Deny(denial) = &decision {
        debug!(reason = ?denial.reason(), "access denied");
    }

    decision
}
