//! Error types for the relay.

use thiserror::Error;

use pr_encode::EncodeError;

/// Errors from relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A single fragment is larger than a whole category buffer and can
    /// never be appended, flushed or not.
    #[error("fragment of {len} bytes exceeds buffer capacity of {capacity}")]
    FragmentTooLarge { len: usize, capacity: usize },

    /// The overflow retry loop hit its sanity cap without the fragment ever
    /// fitting. Only reachable under pathological contention.
    #[error("append stalled after {retries} forced flushes")]
    AppendStalled { retries: usize },

    /// The document buffer could not be allocated during a drain.
    #[error("document allocation failed: {0}")]
    DocumentAlloc(#[from] std::collections::TryReserveError),

    /// A record failed to encode.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
