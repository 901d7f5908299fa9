//! Closed sets of node and relation kinds.
//!
//! Wire tags are stable: they are baked into encoded identifiers and must
//! never be renumbered. Display strings are the `prov:type` values consumers
//! match on.

use serde::{Deserialize, Serialize};

use crate::category::Category;

// File type bits, as in <sys/stat.h>.
const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;

/// Kind of a provenance node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Task,
    File,
    Directory,
    Socket,
    Link,
    Char,
    Block,
    Fifo,
    InodeUnknown,
    Iattr,
    Xattr,
    Packet,
    Content,
    Address,
    Path,
    Argv,
    Envp,
    Msg,
    Shm,
    Superblock,
    String,
    DiscEntity,
    DiscActivity,
    DiscAgent,
    Machine,
}

impl NodeKind {
    /// Stable wire tag for identifier encoding.
    pub const fn tag(self) -> u64 {
        match self {
            NodeKind::Task => 0x01,
            NodeKind::File => 0x02,
            NodeKind::Directory => 0x03,
            NodeKind::Socket => 0x04,
            NodeKind::Link => 0x05,
            NodeKind::Char => 0x06,
            NodeKind::Block => 0x07,
            NodeKind::Fifo => 0x08,
            NodeKind::InodeUnknown => 0x09,
            NodeKind::Iattr => 0x0a,
            NodeKind::Xattr => 0x0b,
            NodeKind::Packet => 0x0c,
            NodeKind::Content => 0x0d,
            NodeKind::Address => 0x0e,
            NodeKind::Path => 0x0f,
            NodeKind::Argv => 0x10,
            NodeKind::Envp => 0x11,
            NodeKind::Msg => 0x12,
            NodeKind::Shm => 0x13,
            NodeKind::Superblock => 0x14,
            NodeKind::String => 0x15,
            NodeKind::DiscEntity => 0x16,
            NodeKind::DiscActivity => 0x17,
            NodeKind::DiscAgent => 0x18,
            NodeKind::Machine => 0x19,
        }
    }

    /// `prov:type` string.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Task => "task",
            NodeKind::File => "file",
            NodeKind::Directory => "directory",
            NodeKind::Socket => "socket",
            NodeKind::Link => "link",
            NodeKind::Char => "char",
            NodeKind::Block => "block",
            NodeKind::Fifo => "fifo",
            NodeKind::InodeUnknown => "inode_unknown",
            NodeKind::Iattr => "iattr",
            NodeKind::Xattr => "xattr",
            NodeKind::Packet => "packet",
            NodeKind::Content => "content",
            NodeKind::Address => "address",
            NodeKind::Path => "path",
            NodeKind::Argv => "argv",
            NodeKind::Envp => "envp",
            NodeKind::Msg => "msg",
            NodeKind::Shm => "shm",
            NodeKind::Superblock => "sb",
            NodeKind::String => "string",
            NodeKind::DiscEntity => "disc_entity",
            NodeKind::DiscActivity => "disc_activity",
            NodeKind::DiscAgent => "disc_agent",
            NodeKind::Machine => "machine",
        }
    }

    /// Output category this kind is buffered under.
    pub const fn category(self) -> Category {
        match self {
            NodeKind::Task | NodeKind::DiscActivity => Category::Activity,
            NodeKind::DiscAgent | NodeKind::Machine => Category::Agent,
            NodeKind::String => Category::Message,
            _ => Category::Entity,
        }
    }

    /// Classify an inode node kind from its `st_mode` file type bits.
    pub const fn from_mode(mode: u32) -> NodeKind {
        match mode & S_IFMT {
            S_IFSOCK => NodeKind::Socket,
            S_IFLNK => NodeKind::Link,
            S_IFREG => NodeKind::File,
            S_IFBLK => NodeKind::Block,
            S_IFDIR => NodeKind::Directory,
            S_IFCHR => NodeKind::Char,
            S_IFIFO => NodeKind::Fifo,
            _ => NodeKind::InodeUnknown,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a provenance relation.
///
/// Each kind belongs to exactly one relation family, which determines the
/// output category and the sender/receiver role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    // used: entity -> activity
    Read,
    Receive,
    Accept,
    Open,
    Search,
    // generated: activity -> entity
    Write,
    Send,
    Connect,
    Create,
    // informed: activity -> activity
    Clone,
    Exec,
    Fork,
    Terminate,
    // derived: entity -> entity
    Version,
    Named,
    Derived,
}

impl RelationKind {
    /// Stable wire tag for identifier encoding.
    pub const fn tag(self) -> u64 {
        match self {
            RelationKind::Read => 0x0101,
            RelationKind::Receive => 0x0102,
            RelationKind::Accept => 0x0103,
            RelationKind::Open => 0x0104,
            RelationKind::Search => 0x0105,
            RelationKind::Write => 0x0201,
            RelationKind::Send => 0x0202,
            RelationKind::Connect => 0x0203,
            RelationKind::Create => 0x0204,
            RelationKind::Clone => 0x0301,
            RelationKind::Exec => 0x0302,
            RelationKind::Fork => 0x0303,
            RelationKind::Terminate => 0x0304,
            RelationKind::Version => 0x0401,
            RelationKind::Named => 0x0402,
            RelationKind::Derived => 0x0403,
        }
    }

    /// `prov:type` string.
    pub const fn as_str(self) -> &'static str {
        match self {
            RelationKind::Read => "read",
            RelationKind::Receive => "receive",
            RelationKind::Accept => "accept",
            RelationKind::Open => "open",
            RelationKind::Search => "search",
            RelationKind::Write => "write",
            RelationKind::Send => "send",
            RelationKind::Connect => "connect",
            RelationKind::Create => "create",
            RelationKind::Clone => "clone",
            RelationKind::Exec => "exec",
            RelationKind::Fork => "fork",
            RelationKind::Terminate => "terminate",
            RelationKind::Version => "version",
            RelationKind::Named => "named",
            RelationKind::Derived => "derived",
        }
    }

    /// Output category of this relation family.
    pub const fn category(self) -> Category {
        match self {
            RelationKind::Read
            | RelationKind::Receive
            | RelationKind::Accept
            | RelationKind::Open
            | RelationKind::Search => Category::Used,
            RelationKind::Write
            | RelationKind::Send
            | RelationKind::Connect
            | RelationKind::Create => Category::Generated,
            RelationKind::Clone
            | RelationKind::Exec
            | RelationKind::Fork
            | RelationKind::Terminate => Category::Informed,
            RelationKind::Version | RelationKind::Named | RelationKind::Derived => {
                Category::Derived
            }
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
