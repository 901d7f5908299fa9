//! Taint bitsets attached to nodes and relations.

use serde::{Deserialize, Serialize};

/// Width of the taint bitset in bytes.
pub const TAINT_BYTES: usize = 32;

/// Bloom-style summary of security labels.
///
/// An all-zero bitset means "no taint" and is omitted from output entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taint(pub [u8; TAINT_BYTES]);

impl Taint {
    pub const EMPTY: Taint = Taint([0; TAINT_BYTES]);

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Hex rendering of the raw bitset; `None` when no bits are set.
    pub fn encode(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(hex::encode(self.0))
        }
    }
}

impl Default for Taint {
    fn default() -> Self {
        Taint::EMPTY
    }
}
