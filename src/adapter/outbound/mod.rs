//! Outbound adapters (driven side).
//!
//! In-memory implementations of every outbound port. They are what the CLI
//! simulator wires together and what the tests run against.

pub mod randomness;
pub mod roles;
pub mod roster;
pub mod treasury;

pub use randomness::RngCoordinator;
pub use roles::RoleTable;
pub use treasury::{TreasuryEntry, TreasuryVault};
