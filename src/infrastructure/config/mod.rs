//! Infrastructure configuration modules.

pub mod currency;
pub mod logging;
pub mod market;
pub mod randomness;
pub mod roles;
pub mod settings;
pub mod tournament;
