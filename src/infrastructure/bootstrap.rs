//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::{RngCoordinator, RoleTable, TreasuryVault};
use crate::application::desk::MarketDesk;
use crate::application::tournament::{Tournament, TournamentSettings};
use crate::domain::{MarketId, Principal, Role};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Concrete adapters shared by the services.
pub struct Components {
    pub roles: Arc<RoleTable>,
    pub treasury: Arc<TreasuryVault>,
    pub randomness: Arc<RngCoordinator>,
}

impl Components {
    /// Grant an extra role on top of the configured ones.
    pub fn grant(&self, principal: &str, role: Role) {
        self.roles.grant(Principal::new(principal), role);
    }
}

/// Build adapters from configuration. `seed` overrides the configured seed.
pub fn build_components(config: &Config, seed: Option<u64>) -> Components {
    for warning in config.warnings() {
        warn!(warning = %warning, "Configuration warning");
    }
    let randomness = match seed.or(config.randomness.seed) {
        Some(seed) => {
            info!(seed, "Randomness seeded");
            RngCoordinator::seeded(seed)
        }
        None => RngCoordinator::from_entropy(),
    };
    Components {
        roles: Arc::new(config.roles.role_table()),
        treasury: Arc::new(TreasuryVault::new()),
        randomness: Arc::new(randomness),
    }
}

/// Build a tournament over `components` with the given settings.
pub fn build_tournament(
    components: &Components,
    settings: TournamentSettings,
) -> Result<Tournament> {
    Tournament::new(
        settings,
        components.roles.clone(),
        components.treasury.clone(),
        components.randomness.clone(),
    )
}

/// Build a free-standing market desk.
pub fn build_desk(components: &Components, config: &Config, id: &str) -> MarketDesk {
    MarketDesk::new(
        MarketId::new(id),
        config.fee_rate(),
        components.roles.clone(),
        components.treasury.clone(),
    )
}
