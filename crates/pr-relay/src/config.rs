//! Relay configuration.

use serde::{Deserialize, Serialize};

use pr_encode::DEFAULT_CAPACITY;

/// Smallest accepted buffer capacity; below this no realistic fragment fits.
const MIN_CAPACITY: usize = 256;

/// Configuration for a [`crate::Relay`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Capacity in bytes of each category buffer and of scratch encoders.
    pub buffer_capacity: usize,
}

impl RelayConfig {
    /// Create config with defaults.
    pub fn new() -> Self {
        RelayConfig {
            buffer_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Set a custom buffer capacity, clamped to the accepted minimum.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(MIN_CAPACITY);
        self
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig::new()
    }
}
