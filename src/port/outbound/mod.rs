//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the settlement core relies on
//! but does not own: roles, registration, randomness and the treasury.

pub mod authority;
pub mod randomness;
pub mod roster;
pub mod treasury;
