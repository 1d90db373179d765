//! Role assignments.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::RoleTable;

/// Principals holding each role.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RolesConfig {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub admins: Vec<String>,
    #[serde(default)]
    pub oracles: Vec<String>,
}

impl RolesConfig {
    /// Build the in-memory role table.
    #[must_use]
    pub fn role_table(&self) -> RoleTable {
        RoleTable::from_assignments(
            self.owner.as_deref(),
            self.admins.iter().map(String::as_str),
            self.oracles.iter().map(String::as_str),
        )
    }

    /// True if someone can run admin operations.
    #[must_use]
    pub fn has_administrator(&self) -> bool {
        self.owner.is_some() || !self.admins.is_empty()
    }

    /// True if someone can report results.
    #[must_use]
    pub fn has_reporter(&self) -> bool {
        self.owner.is_some() || !self.oracles.is_empty()
    }
}
