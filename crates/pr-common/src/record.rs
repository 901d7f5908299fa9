//! Binary provenance record structures.
//!
//! One plain struct per record kind, mirroring the fixed structures the
//! capture transport delivers. Security contexts arrive already resolved to
//! strings; variable-length payloads (paths, arguments, packet content)
//! arrive bounded by the transport's own wire limits. Formatting lives in
//! pr-encode; nothing here allocates on the hot path or takes locks.

use serde::{Deserialize, Serialize};
use std::net::{SocketAddrV4, SocketAddrV6};

use crate::identifier::{NodeIdentifier, PacketIdentifier, RelationIdentifier};
use crate::kind::NodeKind;
use crate::taint::Taint;

/// Maximum disclosed-node content accepted on the wire.
pub const MAX_DISCLOSE_CONTENT: usize = 4096;

/// A process at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub uid: u32,
    pub gid: u32,
    pub pid: u32,
    pub vpid: u32,
    pub ppid: u32,
    pub tgid: u32,
    pub utsns: u32,
    pub ipcns: u32,
    pub mntns: u32,
    pub pidns: u32,
    pub netns: u32,
    pub cgroupns: u32,
    /// Resolved security context, empty when unavailable.
    pub secctx: String,
    pub utime: u64,
    pub stime: u64,
    pub vm: u64,
    pub rss: u64,
    pub hw_vm: u64,
    pub hw_rss: u64,
    pub rbytes: u64,
    pub wbytes: u64,
    pub cancel_wbytes: u64,
}

/// A filesystem inode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inode {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub uid: u32,
    pub gid: u32,
    pub mode: u32,
    /// Resolved security context, empty when unavailable.
    pub secctx: String,
    pub ino: u32,
    /// UUID of the containing filesystem.
    pub sb_uuid: [u8; 16],
}

/// An attribute change on an inode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iattr {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    /// Bitmask of the fields being changed.
    pub valid: u32,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: i64,
    pub atime: i64,
    pub ctime: i64,
    pub mtime: i64,
}

/// An extended attribute operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xattr {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub name: String,
    /// Attribute value, empty when the operation carried none.
    pub value: Vec<u8>,
}

/// A captured network packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub identifier: PacketIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
}

/// The payload bytes of a captured packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketContent {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub content: Vec<u8>,
    /// Whether the capture truncated the payload.
    pub truncated: bool,
}

/// Parsed socket endpoint of an address node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SocketEndpoint {
    Inet(SocketAddrV4),
    Inet6(SocketAddrV6),
    /// Unix domain socket path.
    Unix(String),
    /// Unhandled address family.
    Other(u16),
}

/// A socket address a process bound, connected, or sent to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub endpoint: SocketEndpoint,
}

/// A file path name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathName {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub name: String,
}

/// One argv or envp string of an exec.
///
/// The identifier kind distinguishes arguments from environment entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecArg {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub value: String,
    /// Whether the capture truncated the string.
    pub truncated: bool,
}

/// A System V message queue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgQueue {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
}

/// A shared memory segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shm {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub mode: u32,
}

/// A mounted superblock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superblock {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub uuid: [u8; 16],
}

/// A free-form log line captured from user space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub identifier: NodeIdentifier,
    pub taint: Taint,
    pub jiffies: u64,
    pub msg: String,
}

/// A node disclosed by user space rather than observed by the kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscNode {
    pub identifier: NodeIdentifier,
    pub parent: Option<NodeIdentifier>,
    pub taint: Taint,
    pub jiffies: u64,
    /// Pre-serialized JSON attributes spliced verbatim into the fragment.
    pub content: String,
}

impl DiscNode {
    /// Build a disclosure payload for submission to the audit channel.
    ///
    /// Content beyond [`MAX_DISCLOSE_CONTENT`] bytes is cut at the nearest
    /// character boundary; the canonical identifier is filled in by the
    /// channel on success.
    pub fn new(kind: NodeKind, content: &str) -> Self {
        let mut end = content.len().min(MAX_DISCLOSE_CONTENT);
        while end > 0 && !content.is_char_boundary(end) {
            end -= 1;
        }
        DiscNode {
            identifier: NodeIdentifier::new(kind, 0, 0, 0, 0),
            parent: None,
            taint: Taint::EMPTY,
            jiffies: 0,
            content: content[..end].to_string(),
        }
    }
}

/// A directed edge between two provenance nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub identifier: RelationIdentifier,
    pub snd: NodeIdentifier,
    pub rcv: NodeIdentifier,
    /// Whether the flow was allowed by policy.
    pub allowed: bool,
    pub taint: Taint,
    pub jiffies: u64,
    /// Byte offset of the operation, when file position info was captured.
    pub offset: Option<i64>,
    pub flags: u64,
}

/// Union of every record kind the transport can deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Task(Task),
    Inode(Inode),
    Iattr(Iattr),
    Xattr(Xattr),
    Packet(Packet),
    PacketContent(PacketContent),
    Address(Address),
    Path(PathName),
    Arg(ExecArg),
    Msg(MsgQueue),
    Shm(Shm),
    Superblock(Superblock),
    Log(LogRecord),
    Disclosed(DiscNode),
    Relation(Relation),
}
