//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`ports`] - Scripted randomness and a treasury that can be made to fail.
//! - [`domain`] - Builders for principals, amounts and markets.
//! - [`config`] - Canonical test configurations and tournament settings.
//! - [`fixture`] - A wired tournament with helpers to play rounds.

pub mod config;
pub mod domain;
pub mod fixture;
pub mod ports;
