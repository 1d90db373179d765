//! Application services (use cases).
//!
//! These services wrap the domain state machines with authorization,
//! atomic commit and fund routing through the outbound ports.

pub mod chain;
pub mod desk;
pub mod scenario;
pub mod tournament;

pub use chain::RoundChain;
pub use desk::MarketDesk;
pub use scenario::{ClaimMode, Scenario, ScenarioReport};
pub use tournament::{Tournament, TournamentSettings};
