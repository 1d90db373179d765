//! Squidbet - pari-mutuel elimination tournaments.
//!
//! Players register for a tournament, then bet on a chain of binary events.
//! Each round admits only the winners of the previous one. The winners of
//! the last round vote to split the prize pool or have a random draw pick a
//! single champion.
//!
//! # Architecture
//!
//! - [`domain`] - Pure state machines: market, vote, tie-break, prize pool
//! - [`port`] - Traits for roles, the treasury and randomness
//! - [`adapter`] - In-memory adapters and the CLI
//! - [`application`] - Services that authorize, commit atomically and route funds
//! - [`infrastructure`] - Configuration and wiring
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use squidbet::adapter::outbound::{RngCoordinator, RoleTable, TreasuryVault};
//! use squidbet::application::{Tournament, TournamentSettings};
//!
//! let roles = Arc::new(RoleTable::from_assignments(Some("owner"), Vec::<&str>::new(), Vec::<&str>::new()));
//! let tournament = Tournament::new(
//!     TournamentSettings::default(),
//!     roles,
//!     Arc::new(TreasuryVault::new()),
//!     Arc::new(RngCoordinator::from_entropy()),
//! )?;
//! # Ok::<(), squidbet::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
