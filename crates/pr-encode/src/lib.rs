//! JSON fragment encoding for provenance records.
//!
//! This crate turns the binary record structures of `pr-common` into JSON
//! object fragments ready for the relay's category buffers:
//! - [`EncodeScratch`]: a per-thread, capacity-checked assembly buffer with
//!   attribute writers implementing the wire's number and omission rules
//! - [`Render`]: one formatter per record kind
//! - [`WallClock`]: the process-wide cached timestamp behind a read lock
//! - [`machine_description`]: the one-shot host descriptor document
//!
//! Formatters are pure transforms: no locking, no buffer interaction, no
//! I/O. The wire rules are bit-precise contract — 64-bit integers are always
//! quoted strings, empty values omit their key entirely — which is why the
//! hot path is hand-encoded rather than routed through a generic serializer.

pub mod clock;
pub mod error;
pub mod machine;
pub mod render;
pub mod sanitize;
pub mod scratch;

pub use clock::WallClock;
pub use error::{EncodeError, MachineError};
pub use machine::{machine_description, MachineInfo};
pub use render::Render;
pub use scratch::{EncodeScratch, Fragment, DEFAULT_CAPACITY};
