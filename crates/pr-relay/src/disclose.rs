//! Disclosure of user-space provenance.
//!
//! A caller can synthesize graph elements by delegating to the auditing
//! subsystem, which allocates canonical identifiers and takes ownership of
//! the records. No retry happens here: channel failures carry the
//! subsystem's raw negative code back to the caller unchanged.

use pr_common::{
    AuditChannel, ChannelError, DiscNode, NodeIdentifier, NodeKind, Relation, RelationIdentifier,
    RelationKind, Taint,
};

/// Disclose a node carrying pre-serialized JSON attributes.
///
/// On success returns the canonical identifier the subsystem allocated; on
/// failure nothing is copied back.
pub fn disclose_node(
    channel: &dyn AuditChannel,
    kind: NodeKind,
    content: &str,
) -> Result<NodeIdentifier, ChannelError> {
    let mut node = DiscNode::new(kind, content);
    channel.disclose_node(&mut node)?;
    Ok(node.identifier)
}

/// Disclose an allowed relation between two previously disclosed nodes.
pub fn disclose_relation(
    channel: &dyn AuditChannel,
    kind: RelationKind,
    sender: &NodeIdentifier,
    receiver: &NodeIdentifier,
) -> Result<(), ChannelError> {
    let relation = Relation {
        identifier: RelationIdentifier::new(kind, 0, 0, 0),
        snd: *sender,
        rcv: *receiver,
        allowed: true,
        taint: Taint::EMPTY,
        jiffies: 0,
        offset: None,
        flags: 0,
    };
    channel.disclose_relation(&relation)
}
