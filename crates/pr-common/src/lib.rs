//! Shared vocabulary for the provenance relay.
//!
//! This crate provides the foundational types shared across the relay:
//! - Output categories and their document section names
//! - Node and relation kind closed sets with stable wire tags
//! - Identifiers and their compact string encoding
//! - Taint bitsets
//! - Binary record structures as delivered by the capture transport
//! - The `AuditChannel` contract with the external auditing subsystem

pub mod category;
pub mod channel;
pub mod identifier;
pub mod kind;
pub mod record;
pub mod taint;

pub use category::Category;
pub use channel::{AuditChannel, ChannelError};
pub use identifier::{NodeIdentifier, PacketIdentifier, RelationIdentifier};
pub use kind::{NodeKind, RelationKind};
pub use record::{
    Address, DiscNode, ExecArg, Iattr, Inode, LogRecord, MsgQueue, Packet, PacketContent,
    PathName, Record, Relation, Shm, SocketEndpoint, Superblock, Task, Xattr,
};
pub use taint::Taint;

/// Namespace declarations shared by every emitted document.
///
/// Consumers resolve `cf:` keys against the capture namespace; the spacing
/// is part of the wire contract and must not be normalized.
pub const PREFIX_JSON: &str =
    r#""prov" : "http://www.w3.org/ns/prov", "cf":"http://www.camflow.org""#;
