//! Error types for fragment encoding.

use thiserror::Error;

use pr_common::ChannelError;

/// Errors from fragment assembly.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The fragment outgrew the fixed scratch capacity. Nothing was emitted;
    /// the caller decides whether to reject the record or split it.
    #[error("fragment exceeds scratch capacity of {capacity} bytes")]
    CapacityExceeded { capacity: usize },
}

/// Errors from building the machine descriptor.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
