//! Contract with the external auditing subsystem.
//!
//! The transport that carries records and control calls between this
//! library and the kernel capture layer is out of scope; this trait is the
//! seam it plugs into. Implementations wrap whatever channel the platform
//! provides (netlink, ioctl, a test double).

use thiserror::Error;

use crate::record::{DiscNode, Relation};

/// Raw failure from the capture channel.
///
/// The code is propagated verbatim from the subsystem (negative errno
/// style); no local interpretation or retry happens here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("audit channel returned {code}")]
pub struct ChannelError {
    pub code: i32,
}

impl ChannelError {
    pub fn new(code: i32) -> Self {
        ChannelError { code }
    }
}

/// Control interface of the external auditing subsystem.
pub trait AuditChannel: Send + Sync {
    /// Submit a disclosed node. On success the canonical identifier chosen
    /// by the subsystem has been written into `node.identifier`; on failure
    /// the node is left untouched.
    fn disclose_node(&self, node: &mut DiscNode) -> Result<(), ChannelError>;

    /// Submit a disclosed relation.
    fn disclose_relation(&self, relation: &Relation) -> Result<(), ChannelError>;

    /// Stable identifier of the capturing machine.
    fn machine_id(&self) -> Result<u32, ChannelError>;

    /// Version string of the kernel capture module.
    fn capture_version(&self) -> Result<String, ChannelError>;
}
