//! Record formatters: one per record kind.
//!
//! Each formatter is a pure transform from a binary record to a JSON object
//! fragment. Attribute order is wire contract and follows the capture
//! layer's layout; do not reorder.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;
use uuid::Uuid;

use pr_common::record::{
    Address, DiscNode, ExecArg, Iattr, Inode, LogRecord, MsgQueue, Packet, PacketContent,
    PathName, Record, Relation, Shm, SocketEndpoint, Superblock, Task, Xattr,
};
use pr_common::{Category, NodeIdentifier, NodeKind, RelationKind, Taint};

use crate::error::EncodeError;
use crate::sanitize::{sanitize_arg, sanitize_log, sanitize_path};
use crate::scratch::{EncodeScratch, Fragment};

/// Capability to render into a JSON object fragment.
pub trait Render {
    /// Output category the fragment is buffered under.
    fn category(&self) -> Category;

    /// Format the record using the calling thread's scratch encoder.
    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError>;
}

/// Shared node header: id, type, boot id, machine id, version, date, taint,
/// jiffies.
fn node_header(
    scratch: &mut EncodeScratch,
    identifier: &NodeIdentifier,
    taint: &Taint,
    jiffies: u64,
) {
    scratch.begin(&identifier.encode());
    scratch.attr_u64("cf:id", identifier.id);
    scratch.attr_str("prov:type", identifier.kind.as_str());
    scratch.attr_u32("cf:boot_id", identifier.boot_id);
    scratch.attr_machine_id(identifier.machine_id);
    scratch.attr_u32("cf:version", identifier.version);
    scratch.attr_date();
    if let Some(taint) = taint.encode() {
        scratch.attr_str("cf:taint", &taint);
    }
    scratch.attr_u64("cf:jiffies", jiffies);
}

/// Sender/receiver role names per relation family.
fn endpoint_roles(kind: RelationKind) -> (&'static str, &'static str) {
    match kind.category() {
        Category::Used => ("prov:entity", "prov:activity"),
        Category::Generated => ("prov:activity", "prov:entity"),
        Category::Informed => ("prov:informant", "prov:informed"),
        // derived
        _ => ("prov:usedEntity", "prov:generatedEntity"),
    }
}

impl Render for Task {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_u32("cf:uid", self.uid);
        scratch.attr_u32("cf:gid", self.gid);
        scratch.attr_u32("cf:pid", self.pid);
        scratch.attr_u32("cf:vpid", self.vpid);
        scratch.attr_u32("cf:ppid", self.ppid);
        scratch.attr_u32("cf:tgid", self.tgid);
        scratch.attr_u32("cf:utsns", self.utsns);
        scratch.attr_u32("cf:ipcns", self.ipcns);
        scratch.attr_u32("cf:mntns", self.mntns);
        scratch.attr_u32("cf:pidns", self.pidns);
        scratch.attr_u32("cf:netns", self.netns);
        scratch.attr_u32("cf:cgroupns", self.cgroupns);
        scratch.attr_str("cf:secctx", &self.secctx);
        scratch.attr_u64("cf:utime", self.utime);
        scratch.attr_u64("cf:stime", self.stime);
        scratch.attr_u64("cf:vm", self.vm);
        scratch.attr_u64("cf:rss", self.rss);
        scratch.attr_u64("cf:hw_vm", self.hw_vm);
        scratch.attr_u64("cf:hw_rss", self.hw_rss);
        scratch.attr_u64("cf:rbytes", self.rbytes);
        scratch.attr_u64("cf:wbytes", self.wbytes);
        scratch.attr_u64("cf:cancel_wbytes", self.cancel_wbytes);
        scratch.attr_label(Some("task"), Some(&self.identifier.version.to_string()));
        scratch.finish()
    }
}

impl Render for Inode {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_u32("cf:uid", self.uid);
        scratch.attr_u32("cf:gid", self.gid);
        scratch.attr_u32_hex("cf:mode", self.mode);
        scratch.attr_str("cf:secctx", &self.secctx);
        scratch.attr_u32("cf:ino", self.ino);
        scratch.attr_str("cf:uuid", &Uuid::from_bytes(self.sb_uuid).hyphenated().to_string());
        scratch.attr_label(
            Some(self.identifier.kind.as_str()),
            Some(&self.identifier.version.to_string()),
        );
        scratch.finish()
    }
}

impl Render for Iattr {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_u32_hex("cf:valid", self.valid);
        scratch.attr_u32_hex("cf:mode", self.mode);
        scratch.attr_u32("cf:uid", self.uid);
        scratch.attr_u32("cf:gid", self.gid);
        scratch.attr_i64("cf:size", self.size);
        scratch.attr_i64("cf:atime", self.atime);
        scratch.attr_i64("cf:ctime", self.ctime);
        scratch.attr_i64("cf:mtime", self.mtime);
        scratch.attr_label(Some("iattr"), Some(&self.identifier.id.to_string()));
        scratch.finish()
    }
}

impl Render for Xattr {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_str("cf:name", &self.name);
        if !self.value.is_empty() {
            scratch.attr_u32("cf:size", self.value.len() as u32);
            scratch.attr_str("cf:value", &STANDARD.encode(&self.value));
        }
        scratch.attr_label(Some("xattr"), Some(&self.name));
        scratch.finish()
    }
}

impl Render for PacketContent {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_str("cf:content", &STANDARD.encode(&self.content));
        scratch.attr_u32("cf:length", self.content.len() as u32);
        scratch.attr_str("cf:truncated", if self.truncated { "true" } else { "false" });
        scratch.attr_label(Some("content"), None);
        scratch.finish()
    }
}

impl Render for Superblock {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_str("cf:uuid", &Uuid::from_bytes(self.uuid).hyphenated().to_string());
        scratch.finish()
    }
}

impl Render for MsgQueue {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.finish()
    }
}

impl Render for Shm {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_u32_hex("cf:mode", self.mode);
        scratch.finish()
    }
}

impl Render for Packet {
    fn category(&self) -> Category {
        NodeKind::Packet.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        let id = &self.identifier;
        scratch.begin(&id.encode());
        scratch.attr_u32("cf:id", id.id);
        scratch.attr_u32("cf:seq", id.seq);
        scratch.attr_ipv4("cf:sender", id.snd_ip, id.snd_port);
        scratch.attr_ipv4("cf:receiver", id.rcv_ip, id.rcv_port);
        scratch.attr_str("prov:type", NodeKind::Packet.as_str());
        if let Some(taint) = self.taint.encode() {
            scratch.attr_str("cf:taint", &taint);
        }
        scratch.attr_u64("cf:jiffies", self.jiffies);
        let label = format!("{}->{} ({})", id.sender(), id.receiver(), id.id);
        scratch.attr_label(Some("packet"), Some(&label));
        scratch.finish()
    }
}

impl Render for Address {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        scratch.attr_json("cf:address", &endpoint_json(&self.endpoint));
        scratch.attr_label(Some("address"), Some(&endpoint_label(&self.endpoint)));
        scratch.finish()
    }
}

fn endpoint_json(endpoint: &SocketEndpoint) -> String {
    match endpoint {
        SocketEndpoint::Inet(addr) => json!({
            "type": "AF_INET",
            "host": addr.ip().to_string(),
            "serv": addr.port().to_string(),
        })
        .to_string(),
        SocketEndpoint::Inet6(addr) => json!({
            "type": "AF_INET6",
            "host": addr.ip().to_string(),
            "serv": addr.port().to_string(),
        })
        .to_string(),
        SocketEndpoint::Unix(path) => json!({
            "type": "AF_UNIX",
            "path": path,
        })
        .to_string(),
        SocketEndpoint::Other(_) => json!({ "type": "OTHER" }).to_string(),
    }
}

fn endpoint_label(endpoint: &SocketEndpoint) -> String {
    match endpoint {
        SocketEndpoint::Inet(addr) => format!("IPV4 {}", addr.ip()),
        SocketEndpoint::Inet6(addr) => format!("IPV6 {}", addr.ip()),
        SocketEndpoint::Unix(path) => format!("UNIX {path}"),
        SocketEndpoint::Other(_) => "OTHER".to_string(),
    }
}

impl Render for PathName {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        let name = sanitize_path(&self.name);
        scratch.attr_str("cf:pathname", &name);
        scratch.attr_label(Some("path"), Some(&name));
        scratch.finish()
    }
}

impl Render for ExecArg {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        let value = sanitize_arg(&self.value);
        scratch.attr_str("cf:value", &value);
        scratch.attr_str("cf:truncated", if self.truncated { "true" } else { "false" });
        let tag = if self.identifier.kind == NodeKind::Envp {
            "envp"
        } else {
            "argv"
        };
        scratch.attr_label(Some(tag), Some(&value));
        scratch.finish()
    }
}

impl Render for LogRecord {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        let msg = sanitize_log(&self.msg);
        scratch.attr_str("cf:log", &msg);
        scratch.attr_label(Some("log"), Some(&msg));
        scratch.finish()
    }
}

impl Render for DiscNode {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        node_header(scratch, &self.identifier, &self.taint, self.jiffies);
        let parent = self.parent.map(|p| p.encode()).unwrap_or_default();
        scratch.attr_reference("cf:hasParent", &parent);
        scratch.splice_attrs(&self.content);
        scratch.finish()
    }
}

impl Render for Relation {
    fn category(&self) -> Category {
        self.identifier.kind.category()
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        scratch.begin(&self.identifier.encode());
        scratch.attr_u64("cf:id", self.identifier.id);
        scratch.attr_str("prov:type", self.identifier.kind.as_str());
        scratch.attr_u32("cf:boot_id", self.identifier.boot_id);
        scratch.attr_machine_id(self.identifier.machine_id);
        scratch.attr_date();
        if let Some(taint) = self.taint.encode() {
            scratch.attr_str("cf:taint", &taint);
        }
        scratch.attr_u64("cf:jiffies", self.jiffies);
        scratch.attr_label(None, Some(self.identifier.kind.as_str()));
        scratch.attr_str("cf:allowed", if self.allowed { "true" } else { "false" });
        let (snd_role, rcv_role) = endpoint_roles(self.identifier.kind);
        scratch.attr_reference(snd_role, &self.snd.encode());
        scratch.attr_reference(rcv_role, &self.rcv.encode());
        if let Some(offset) = self.offset {
            if offset > 0 {
                scratch.attr_i64("cf:offset", offset);
            }
        }
        scratch.attr_u64_hex("cf:flags", self.flags);
        scratch.finish()
    }
}

impl Render for Record {
    fn category(&self) -> Category {
        match self {
            Record::Task(r) => r.category(),
            Record::Inode(r) => r.category(),
            Record::Iattr(r) => r.category(),
            Record::Xattr(r) => r.category(),
            Record::Packet(r) => r.category(),
            Record::PacketContent(r) => r.category(),
            Record::Address(r) => r.category(),
            Record::Path(r) => r.category(),
            Record::Arg(r) => r.category(),
            Record::Msg(r) => r.category(),
            Record::Shm(r) => r.category(),
            Record::Superblock(r) => r.category(),
            Record::Log(r) => r.category(),
            Record::Disclosed(r) => r.category(),
            Record::Relation(r) => r.category(),
        }
    }

    fn render(&self, scratch: &mut EncodeScratch) -> Result<Fragment, EncodeError> {
        match self {
            Record::Task(r) => r.render(scratch),
            Record::Inode(r) => r.render(scratch),
            Record::Iattr(r) => r.render(scratch),
            Record::Xattr(r) => r.render(scratch),
            Record::Packet(r) => r.render(scratch),
            Record::PacketContent(r) => r.render(scratch),
            Record::Address(r) => r.render(scratch),
            Record::Path(r) => r.render(scratch),
            Record::Arg(r) => r.render(scratch),
            Record::Msg(r) => r.render(scratch),
            Record::Shm(r) => r.render(scratch),
            Record::Superblock(r) => r.render(scratch),
            Record::Log(r) => r.render(scratch),
            Record::Disclosed(r) => r.render(scratch),
            Record::Relation(r) => r.render(scratch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::WallClock;
    use pr_common::{PacketIdentifier, RelationIdentifier};
    use std::sync::Arc;

    fn scratch() -> EncodeScratch {
        let clock = Arc::new(WallClock::new());
        clock.set("2026:08:07T00:00:00");
        EncodeScratch::new(clock, 8192)
    }

    fn node_id(kind: NodeKind, id: u64) -> NodeIdentifier {
        NodeIdentifier::new(kind, id, 1, 9, 0)
    }

    #[test]
    fn test_msg_fragment_exact_layout() {
        let record = MsgQueue {
            identifier: node_id(NodeKind::Msg, 5),
            taint: Taint::EMPTY,
            jiffies: 77,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let expected = format!(
            "\"cf:{}\":{{\"cf:id\":\"5\",\"prov:type\":\"msg\",\"cf:boot_id\":1,\
             \"cf:machine_id\":\"cf:9\",\"cf:version\":0,\
             \"cf:date\":\"2026:08:07T00:00:00\",\"cf:jiffies\":\"77\"}}",
            record.identifier.encode()
        );
        assert_eq!(fragment.as_str(), expected);
    }

    #[test]
    fn test_node_fragment_is_valid_json() {
        let record = Task {
            identifier: node_id(NodeKind::Task, 12),
            taint: Taint::EMPTY,
            jiffies: 1000,
            uid: 1000,
            gid: 1000,
            pid: 4242,
            vpid: 4242,
            ppid: 1,
            tgid: 4242,
            utsns: 1,
            ipcns: 1,
            mntns: 1,
            pidns: 1,
            netns: 1,
            cgroupns: 1,
            secctx: "unconfined_u:unconfined_r".to_string(),
            utime: 10,
            stime: 20,
            vm: 1 << 20,
            rss: 1 << 16,
            hw_vm: 1 << 21,
            hw_rss: 1 << 17,
            rbytes: 123,
            wbytes: 456,
            cancel_wbytes: 0,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format!("{{{fragment}}}")).unwrap();
        let obj = value
            .get(format!("cf:{}", record.identifier.encode()))
            .unwrap();
        assert_eq!(obj["cf:pid"], 4242);
        assert_eq!(obj["cf:rbytes"], "123");
        assert_eq!(obj["prov:label"], "[task] 0");
        assert_eq!(record.category(), Category::Activity);
    }

    #[test]
    fn test_pathname_normalizes_backslashes() {
        let record = PathName {
            identifier: node_id(NodeKind::Path, 3),
            taint: Taint::EMPTY,
            jiffies: 0,
            name: "a\\b\\c".to_string(),
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(fragment.as_str().contains("\"cf:pathname\":\"a/b/c\""));
        assert!(fragment.as_str().contains("\"prov:label\":\"[path] a/b/c\""));
    }

    #[test]
    fn test_empty_secctx_is_omitted() {
        let record = Inode {
            identifier: node_id(NodeKind::File, 8),
            taint: Taint::EMPTY,
            jiffies: 0,
            uid: 0,
            gid: 0,
            mode: 0o100644,
            secctx: String::new(),
            ino: 99,
            sb_uuid: [0xab; 16],
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(!fragment.as_str().contains("cf:secctx"));
        assert!(fragment.as_str().contains("\"cf:mode\":\"0x81a4\""));
        assert!(fragment
            .as_str()
            .contains("\"cf:uuid\":\"abababab-abab-abab-abab-abababababab\""));
    }

    #[test]
    fn test_taint_rendered_when_set() {
        let mut bits = [0u8; 32];
        bits[0] = 0x01;
        let record = MsgQueue {
            identifier: node_id(NodeKind::Msg, 1),
            taint: Taint(bits),
            jiffies: 0,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(fragment.as_str().contains("\"cf:taint\":\"01"));
    }

    #[test]
    fn test_packet_label_and_addresses() {
        let snd = "10.0.0.1:8080".parse().unwrap();
        let rcv = "192.168.1.9:443".parse().unwrap();
        let record = Packet {
            identifier: PacketIdentifier::from_flow(3, 11, snd, rcv),
            taint: Taint::EMPTY,
            jiffies: 42,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(fragment.as_str().contains("\"cf:sender\":\"10.0.0.1:8080\""));
        assert!(fragment
            .as_str()
            .contains("\"cf:receiver\":\"192.168.1.9:443\""));
        assert!(fragment
            .as_str()
            .contains("\"prov:label\":\"[packet] 10.0.0.1:8080->192.168.1.9:443 (3)\""));
        // packet ids are 32-bit: bare numbers
        assert!(fragment.as_str().contains("\"cf:id\":3,"));
    }

    #[test]
    fn test_address_embeds_composite_json() {
        let record = Address {
            identifier: node_id(NodeKind::Address, 6),
            taint: Taint::EMPTY,
            jiffies: 0,
            endpoint: SocketEndpoint::Unix("/run/app.sock".to_string()),
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format!("{{{fragment}}}")).unwrap();
        let obj = value
            .get(format!("cf:{}", record.identifier.encode()))
            .unwrap();
        assert_eq!(obj["cf:address"]["type"], "AF_UNIX");
        assert_eq!(obj["cf:address"]["path"], "/run/app.sock");
        assert_eq!(obj["prov:label"], "[address] UNIX /run/app.sock");
    }

    #[test]
    fn test_arg_escapes_quotes() {
        let record = ExecArg {
            identifier: node_id(NodeKind::Argv, 2),
            taint: Taint::EMPTY,
            jiffies: 0,
            value: "--msg=\"hi\"".to_string(),
            truncated: false,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format!("{{{fragment}}}")).unwrap();
        let obj = value
            .get(format!("cf:{}", record.identifier.encode()))
            .unwrap();
        assert_eq!(obj["cf:value"], "--msg=\"hi\"");
        assert_eq!(obj["cf:truncated"], "false");
        assert_eq!(obj["prov:label"], "[argv] --msg=\"hi\"");
    }

    #[test]
    fn test_envp_label_tag() {
        let record = ExecArg {
            identifier: node_id(NodeKind::Envp, 2),
            taint: Taint::EMPTY,
            jiffies: 0,
            value: "HOME=/root".to_string(),
            truncated: false,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(fragment.as_str().contains("\"prov:label\":\"[envp] HOME=/root\""));
    }

    #[test]
    fn test_disc_node_splices_content() {
        let mut record = DiscNode::new(NodeKind::DiscEntity, "\"cf:app\":\"builder\"");
        record.identifier = node_id(NodeKind::DiscEntity, 21);
        record.parent = Some(node_id(NodeKind::DiscActivity, 20));
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format!("{{{fragment}}}")).unwrap();
        let obj = value
            .get(format!("cf:{}", record.identifier.encode()))
            .unwrap();
        assert_eq!(obj["cf:app"], "builder");
        assert_eq!(
            obj["cf:hasParent"],
            format!("cf:{}", record.parent.unwrap().encode())
        );
    }

    #[test]
    fn test_relation_roles_per_family() {
        let used = Relation {
            identifier: RelationIdentifier::new(RelationKind::Read, 50, 1, 9),
            snd: node_id(NodeKind::File, 8),
            rcv: node_id(NodeKind::Task, 12),
            allowed: true,
            taint: Taint::EMPTY,
            jiffies: 10,
            offset: Some(4096),
            flags: 0,
        };
        let mut s = scratch();
        let fragment = used.render(&mut s).unwrap();
        assert_eq!(used.category(), Category::Used);
        assert!(fragment
            .as_str()
            .contains(&format!("\"prov:entity\":\"cf:{}\"", used.snd.encode())));
        assert!(fragment
            .as_str()
            .contains(&format!("\"prov:activity\":\"cf:{}\"", used.rcv.encode())));
        assert!(fragment.as_str().contains("\"cf:allowed\":\"true\""));
        assert!(fragment.as_str().contains("\"cf:offset\":\"4096\""));
        assert!(fragment.as_str().contains("\"prov:label\":\"read\""));

        let informed = Relation {
            identifier: RelationIdentifier::new(RelationKind::Fork, 51, 1, 9),
            snd: node_id(NodeKind::Task, 1),
            rcv: node_id(NodeKind::Task, 2),
            allowed: false,
            taint: Taint::EMPTY,
            jiffies: 10,
            offset: None,
            flags: 0x8001,
        };
        let fragment = informed.render(&mut s).unwrap();
        assert_eq!(informed.category(), Category::Informed);
        assert!(fragment.as_str().contains("\"prov:informant\":"));
        assert!(fragment.as_str().contains("\"prov:informed\":"));
        assert!(fragment.as_str().contains("\"cf:allowed\":\"false\""));
        assert!(!fragment.as_str().contains("cf:offset"));
        assert!(fragment.as_str().contains("\"cf:flags\":\"8001\""));
    }

    #[test]
    fn test_xattr_value_roundtrip() {
        let record = Xattr {
            identifier: node_id(NodeKind::Xattr, 4),
            taint: Taint::EMPTY,
            jiffies: 0,
            name: "security.selinux".to_string(),
            value: b"system_u:object_r".to_vec(),
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&format!("{{{fragment}}}")).unwrap();
        let obj = value
            .get(format!("cf:{}", record.identifier.encode()))
            .unwrap();
        assert_eq!(obj["cf:size"], 17);
        let decoded = STANDARD
            .decode(obj["cf:value"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, b"system_u:object_r");
    }

    #[test]
    fn test_packet_content_truncation_flag() {
        let record = PacketContent {
            identifier: node_id(NodeKind::Content, 7),
            taint: Taint::EMPTY,
            jiffies: 0,
            content: vec![0xde, 0xad, 0xbe, 0xef],
            truncated: true,
        };
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert!(fragment.as_str().contains("\"cf:length\":4"));
        assert!(fragment.as_str().contains("\"cf:truncated\":\"true\""));
        assert!(fragment.as_str().contains("\"prov:label\":\"[content] \""));
    }

    #[test]
    fn test_record_enum_delegates() {
        let record = Record::Log(LogRecord {
            identifier: node_id(NodeKind::String, 30),
            taint: Taint::EMPTY,
            jiffies: 0,
            msg: "boot \"ok\"".to_string(),
        });
        let mut s = scratch();
        let fragment = record.render(&mut s).unwrap();
        assert_eq!(record.category(), Category::Message);
        assert!(fragment.as_str().contains("\"cf:log\":\"boot  ok \""));
    }
}
