//! Randomness coordinator configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process randomness coordinator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomnessConfig {
    /// Fixed seed for reproducible draws. Entropy is used when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Values requested per draw (default: 1). Only the first is used.
    #[serde(default = "default_values_per_request")]
    pub values_per_request: u32,
}

const fn default_values_per_request() -> u32 {
    1
}

impl Default for RandomnessConfig {
    fn default() -> Self {
        Self {
            seed: None,
            values_per_request: default_values_per_request(),
        }
    }
}
