//! In-memory role table.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Principal, Role};
use crate::port::Authority;

/// Role assignments held in memory, seeded from configuration.
#[derive(Debug, Default)]
pub struct RoleTable {
    grants: RwLock<HashMap<Principal, HashSet<Role>>>,
}

impl RoleTable {
    /// Create an empty table. Nobody holds any role.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the owner, admin and oracle lists.
    pub fn from_assignments<'a>(
        owner: Option<&'a str>,
        admins: impl IntoIterator<Item = &'a str>,
        oracles: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let table = Self::new();
        if let Some(owner) = owner {
            table.grant(Principal::new(owner), Role::Owner);
        }
        for admin in admins {
            table.grant(Principal::new(admin), Role::Admin);
        }
        for oracle in oracles {
            table.grant(Principal::new(oracle), Role::Oracle);
        }
        table
    }

    pub fn grant(&self, principal: Principal, role: Role) {
        debug!(principal = %principal, role = %role, "Role granted");
        self.grants.write().entry(principal).or_default().insert(role);
    }

    /// Returns true if the role was held.
    pub fn revoke(&self, principal: &Principal, role: Role) -> bool {
        self.grants
            .write()
            .get_mut(principal)
            .is_some_and(|roles| roles.remove(&role))
    }

    /// Principals holding `role`, sorted.
    pub fn holders(&self, role: Role) -> Vec<Principal> {
        let mut holders: Vec<Principal> = self
            .grants
            .read()
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(principal, _)| principal.clone())
            .collect();
        holders.sort();
        holders
    }
}

impl Authority for RoleTable {
    fn has_role(&self, principal: &Principal, role: Role) -> bool {
        self.grants
            .read()
            .get(principal)
            .is_some_and(|roles| roles.contains(&role))
    }
}
