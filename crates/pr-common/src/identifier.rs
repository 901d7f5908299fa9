//! Node, relation, and packet identifiers and their compact string encoding.
//!
//! An identifier is unique within one boot of one machine. The string form
//! (URL-safe base64 of a fixed 32-byte wire image, no padding) is what
//! appears as document keys and reference targets.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::kind::{NodeKind, RelationKind};

/// Size of the fixed identifier wire image.
pub const IDENTIFIER_WIRE_BYTES: usize = 32;

/// Identifier of a provenance node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIdentifier {
    pub kind: NodeKind,
    /// Numeric id, unique per boot.
    pub id: u64,
    pub boot_id: u32,
    pub machine_id: u32,
    /// Schema version of the node.
    pub version: u32,
}

impl NodeIdentifier {
    pub fn new(kind: NodeKind, id: u64, boot_id: u32, machine_id: u32, version: u32) -> Self {
        NodeIdentifier {
            kind,
            id,
            boot_id,
            machine_id,
            version,
        }
    }

    /// Fixed wire image: tag, id, boot id, machine id, version, zero pad.
    pub fn to_wire(&self) -> [u8; IDENTIFIER_WIRE_BYTES] {
        let mut buf = [0u8; IDENTIFIER_WIRE_BYTES];
        buf[0..8].copy_from_slice(&self.kind.tag().to_le_bytes());
        buf[8..16].copy_from_slice(&self.id.to_le_bytes());
        buf[16..20].copy_from_slice(&self.boot_id.to_le_bytes());
        buf[20..24].copy_from_slice(&self.machine_id.to_le_bytes());
        buf[24..28].copy_from_slice(&self.version.to_le_bytes());
        buf
    }

    /// Compact string form used as document keys and reference targets.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_wire())
    }
}

/// Identifier of a provenance relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationIdentifier {
    pub kind: RelationKind,
    pub id: u64,
    pub boot_id: u32,
    pub machine_id: u32,
}

impl RelationIdentifier {
    pub fn new(kind: RelationKind, id: u64, boot_id: u32, machine_id: u32) -> Self {
        RelationIdentifier {
            kind,
            id,
            boot_id,
            machine_id,
        }
    }

    /// Fixed wire image: tag, id, boot id, machine id, zero pad.
    pub fn to_wire(&self) -> [u8; IDENTIFIER_WIRE_BYTES] {
        let mut buf = [0u8; IDENTIFIER_WIRE_BYTES];
        buf[0..8].copy_from_slice(&self.kind.tag().to_le_bytes());
        buf[8..16].copy_from_slice(&self.id.to_le_bytes());
        buf[16..20].copy_from_slice(&self.boot_id.to_le_bytes());
        buf[20..24].copy_from_slice(&self.machine_id.to_le_bytes());
        buf
    }

    /// Compact string form used as document keys.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_wire())
    }
}

/// Identifier of a captured network packet.
///
/// Addresses and ports are carried in network byte order, exactly as they
/// appear on the wire. Use [`PacketIdentifier::from_flow`] to construct one
/// portably from parsed socket addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketIdentifier {
    pub id: u32,
    pub seq: u32,
    pub snd_ip: u32,
    pub rcv_ip: u32,
    pub snd_port: u16,
    pub rcv_port: u16,
}

impl PacketIdentifier {
    /// Build an identifier from parsed flow endpoints.
    pub fn from_flow(id: u32, seq: u32, sender: SocketAddrV4, receiver: SocketAddrV4) -> Self {
        PacketIdentifier {
            id,
            seq,
            snd_ip: u32::from(*sender.ip()).to_be(),
            rcv_ip: u32::from(*receiver.ip()).to_be(),
            snd_port: sender.port().to_be(),
            rcv_port: receiver.port().to_be(),
        }
    }

    /// Sender endpoint in host order.
    pub fn sender(&self) -> SocketAddrV4 {
        SocketAddrV4::new(
            Ipv4Addr::from(u32::from_be(self.snd_ip)),
            u16::from_be(self.snd_port),
        )
    }

    /// Receiver endpoint in host order.
    pub fn receiver(&self) -> SocketAddrV4 {
        SocketAddrV4::new(
            Ipv4Addr::from(u32::from_be(self.rcv_ip)),
            u16::from_be(self.rcv_port),
        )
    }

    /// Fixed wire image: packet tag, id, seq, flow endpoints, zero pad.
    pub fn to_wire(&self) -> [u8; IDENTIFIER_WIRE_BYTES] {
        let mut buf = [0u8; IDENTIFIER_WIRE_BYTES];
        buf[0..8].copy_from_slice(&NodeKind::Packet.tag().to_le_bytes());
        buf[8..12].copy_from_slice(&self.id.to_le_bytes());
        buf[12..16].copy_from_slice(&self.seq.to_le_bytes());
        buf[16..20].copy_from_slice(&self.snd_ip.to_le_bytes());
        buf[20..24].copy_from_slice(&self.rcv_ip.to_le_bytes());
        buf[24..26].copy_from_slice(&self.snd_port.to_le_bytes());
        buf[26..28].copy_from_slice(&self.rcv_port.to_le_bytes());
        buf
    }

    /// Compact string form used as document keys.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.to_wire())
    }
}
