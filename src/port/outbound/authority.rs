//! Role lookup port.

use crate::domain::{AuthorizationError, Operation, Principal, Role};

/// Answers whether a principal holds a role.
///
/// Implementations only know about roles. Which roles an operation needs
/// is decided by [`Operation::roles`], so [`authorize`](Authority::authorize)
/// is provided here and should not be overridden.
pub trait Authority: Send + Sync {
    fn has_role(&self, principal: &Principal, role: Role) -> bool;

    /// Succeed if `principal` holds any role `operation` accepts.
    fn authorize(
        &self,
        principal: &Principal,
        operation: Operation,
    ) -> Result<(), AuthorizationError> {
        if operation
            .roles()
            .iter()
            .any(|role| self.has_role(principal, *role))
        {
            Ok(())
        } else {
            Err(AuthorizationError::Forbidden {
                operation,
                principal: principal.clone(),
            })
        }
    }
}
