//! Buffered PROV-JSON aggregation and delivery.
//!
//! The relay sits between a high-rate binary record source and a slow
//! consumer: rendered fragments accumulate in eight independently locked
//! category buffers, and whenever a buffer would overflow (or the caller
//! forces it) every category is drained into one self-contained document
//! and handed to the registered [`Sink`].
//!
//! # Architecture
//!
//! ```text
//! record -> Render -> Fragment -> Relay::append -> [category buffer x8]
//!                                                        |
//!                                   flush (single flight) v
//!                                              document -> Sink::emit
//! ```
//!
//! Flushing is non-blocking single flight: at most one thread drains at a
//! time, and a losing caller returns immediately with its data still safely
//! buffered.

mod buffer;
pub mod config;
pub mod disclose;
pub mod error;
pub mod relay;

pub use config::RelayConfig;
pub use disclose::{disclose_node, disclose_relation};
pub use error::RelayError;
pub use relay::{FlushOutcome, Relay, Sink};
