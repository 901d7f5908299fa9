//! Capacity-checked fragment assembly.
//!
//! An [`EncodeScratch`] is a per-thread context: create one per worker and
//! reuse it across records. Appends are checked against the fixed capacity;
//! an append that would overflow marks the scratch and appends nothing, and
//! [`EncodeScratch::finish`] reports the overflow instead of handing out a
//! corrupt fragment.

use std::fmt::{self, Write as _};
use std::net::Ipv4Addr;
use std::sync::Arc;

use crate::clock::WallClock;
use crate::error::EncodeError;

/// Default scratch and category-buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 1 << 13;

/// A rendered JSON object fragment: `"cf:<id>":{...}`.
///
/// Owned by the caller and valid independently of the scratch it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(pub(crate) String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-thread fragment encoder.
///
/// Attribute writers implement the wire's encoding rules: 32-bit integers
/// are bare JSON numbers, 64-bit integers are always quoted strings (so the
/// full range survives consumers with 64-bit-unsafe number types), 32-bit
/// hex carries a `0x` prefix while 64-bit hex does not, and empty strings or
/// references omit their key entirely.
#[derive(Debug)]
pub struct EncodeScratch {
    buf: String,
    capacity: usize,
    needs_comma: bool,
    overflowed: bool,
    clock: Arc<WallClock>,
}

/// Checked writer over the scratch buffer; refuses writes past capacity.
struct CheckedWrite<'a>(&'a mut EncodeScratch);

impl fmt::Write for CheckedWrite<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.0.overflowed || self.0.buf.len() + s.len() > self.0.capacity {
            self.0.overflowed = true;
            return Err(fmt::Error);
        }
        self.0.buf.push_str(s);
        Ok(())
    }
}

impl EncodeScratch {
    pub fn new(clock: Arc<WallClock>, capacity: usize) -> Self {
        EncodeScratch {
            buf: String::with_capacity(capacity),
            capacity,
            needs_comma: false,
            overflowed: false,
            clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reset the scratch and open an object keyed `"cf:<id>"`.
    pub fn begin(&mut self, id: &str) {
        self.buf.clear();
        self.needs_comma = false;
        self.overflowed = false;
        self.push("\"cf:");
        self.push(id);
        self.push("\":{");
    }

    fn push(&mut self, s: &str) {
        if self.overflowed || self.buf.len() + s.len() > self.capacity {
            self.overflowed = true;
            return;
        }
        self.buf.push_str(s);
    }

    fn push_fmt(&mut self, args: fmt::Arguments<'_>) {
        let _ = CheckedWrite(self).write_fmt(args);
    }

    /// Open an attribute: separator, quoted name, colon.
    fn key(&mut self, name: &str) {
        if self.needs_comma {
            self.push(",\"");
        } else {
            self.push("\"");
            self.needs_comma = true;
        }
        self.push(name);
        self.push("\":");
    }

    pub fn attr_u32(&mut self, name: &str, value: u32) {
        self.key(name);
        self.push_fmt(format_args!("{value}"));
    }

    pub fn attr_i32(&mut self, name: &str, value: i32) {
        self.key(name);
        self.push_fmt(format_args!("{value}"));
    }

    pub fn attr_u32_hex(&mut self, name: &str, value: u32) {
        self.key(name);
        self.push_fmt(format_args!("\"0x{value:x}\""));
    }

    pub fn attr_u64(&mut self, name: &str, value: u64) {
        self.key(name);
        self.push_fmt(format_args!("\"{value}\""));
    }

    pub fn attr_u64_hex(&mut self, name: &str, value: u64) {
        self.key(name);
        self.push_fmt(format_args!("\"{value:x}\""));
    }

    pub fn attr_i64(&mut self, name: &str, value: i64) {
        self.key(name);
        self.push_fmt(format_args!("\"{value}\""));
    }

    /// Emitted only when `value` is non-empty; an empty value omits the key.
    pub fn attr_str(&mut self, name: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.key(name);
        self.push("\"");
        self.push(value);
        self.push("\"");
    }

    /// Namespaced pointer to another node or relation; omitted when the id
    /// string is empty.
    pub fn attr_reference(&mut self, name: &str, id: &str) {
        if id.is_empty() {
            return;
        }
        self.key(name);
        self.push("\"cf:");
        self.push(id);
        self.push("\"");
    }

    /// Always emitted, as a namespaced identifier string.
    pub fn attr_machine_id(&mut self, value: u32) {
        self.key("cf:machine_id");
        self.push_fmt(format_args!("\"cf:{value}\""));
    }

    /// `prov:label` attribute: `"[<type>] <text>"` with a type tag, else
    /// `"<text>"`. A missing text leaves only the bracketed type.
    pub fn attr_label(&mut self, type_tag: Option<&str>, text: Option<&str>) {
        self.key("prov:label");
        match type_tag {
            Some(tag) => {
                self.push("\"[");
                self.push(tag);
                self.push("] ");
            }
            None => self.push("\""),
        }
        if let Some(text) = text {
            self.push(text);
        }
        self.push("\"");
    }

    /// Copy the cached timestamp under its read lock.
    pub fn attr_date(&mut self) {
        self.key("cf:date");
        self.push("\"");
        let clock = Arc::clone(&self.clock);
        clock.with(|date| self.push(date));
        self.push("\"");
    }

    /// `"<dotted-quad>:<port>"`; inputs are network byte order, the port is
    /// converted to host order before rendering.
    pub fn attr_ipv4(&mut self, name: &str, ip: u32, port: u16) {
        self.key(name);
        self.push("\"");
        self.push_fmt(format_args!(
            "{}:{}",
            Ipv4Addr::from(u32::from_be(ip)),
            u16::from_be(port)
        ));
        self.push("\"");
    }

    /// Embed an already-serialized JSON value verbatim.
    pub fn attr_json(&mut self, name: &str, value: &str) {
        self.key(name);
        self.push(value);
    }

    /// Splice pre-serialized attributes verbatim, with a leading separator
    /// when needed.
    pub fn splice_attrs(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        if self.needs_comma {
            self.push(",");
        }
        self.push(raw);
        self.needs_comma = true;
    }

    /// Close the object and hand out the fragment, or report the overflow.
    pub fn finish(&mut self) -> Result<Fragment, EncodeError> {
        self.push("}");
        if self.overflowed {
            return Err(EncodeError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(Fragment(self.buf.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(capacity: usize) -> EncodeScratch {
        EncodeScratch::new(Arc::new(WallClock::new()), capacity)
    }

    #[test]
    fn test_u64_max_is_quoted() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_u64("cf:big", u64::MAX);
        let fragment = s.finish().unwrap();
        assert_eq!(
            fragment.as_str(),
            "\"cf:1\":{\"cf:big\":\"18446744073709551615\"}"
        );
    }

    #[test]
    fn test_u32_is_bare() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_u32("cf:pid", 4242);
        assert_eq!(s.finish().unwrap().as_str(), "\"cf:1\":{\"cf:pid\":4242}");
    }

    #[test]
    fn test_hex_prefixes() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_u32_hex("cf:mode", 0o100644);
        s.attr_u64_hex("cf:flags", 0x8001);
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:mode\":\"0x81a4\",\"cf:flags\":\"8001\"}"
        );
    }

    #[test]
    fn test_negative_values() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_i32("cf:n", -7);
        s.attr_i64("cf:offset", -1);
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:n\":-7,\"cf:offset\":\"-1\"}"
        );
    }

    #[test]
    fn test_empty_string_omits_key() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_str("cf:secctx", "");
        s.attr_u32("cf:pid", 1);
        assert_eq!(s.finish().unwrap().as_str(), "\"cf:1\":{\"cf:pid\":1}");
    }

    #[test]
    fn test_empty_reference_omits_key() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_reference("cf:hasParent", "");
        s.attr_reference("prov:entity", "abc");
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"prov:entity\":\"cf:abc\"}"
        );
    }

    #[test]
    fn test_label_with_type() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_label(Some("task"), Some("3"));
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"prov:label\":\"[task] 3\"}"
        );
    }

    #[test]
    fn test_label_without_type() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_label(None, Some("hello"));
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"prov:label\":\"hello\"}"
        );
    }

    #[test]
    fn test_label_without_text_keeps_type() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_label(Some("content"), None);
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"prov:label\":\"[content] \"}"
        );
    }

    #[test]
    fn test_machine_id_is_namespaced() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_machine_id(77);
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:machine_id\":\"cf:77\"}"
        );
    }

    #[test]
    fn test_ipv4_converts_port_to_host_order() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_ipv4("cf:sender", u32::from(Ipv4Addr::new(10, 0, 0, 1)).to_be(), 8080u16.to_be());
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:sender\":\"10.0.0.1:8080\"}"
        );
    }

    #[test]
    fn test_date_reads_cached_clock() {
        let clock = Arc::new(WallClock::new());
        clock.set("2026:08:07T00:00:00");
        let mut s = EncodeScratch::new(clock, 256);
        s.begin("1");
        s.attr_date();
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:date\":\"2026:08:07T00:00:00\"}"
        );
    }

    #[test]
    fn test_splice_attrs() {
        let mut s = scratch(256);
        s.begin("1");
        s.attr_u32("cf:pid", 1);
        s.splice_attrs("\"cf:extra\":\"v\"");
        assert_eq!(
            s.finish().unwrap().as_str(),
            "\"cf:1\":{\"cf:pid\":1,\"cf:extra\":\"v\"}"
        );
    }

    #[test]
    fn test_overflow_is_reported_not_truncated() {
        let mut s = scratch(32);
        s.begin("1");
        s.attr_str("cf:pathname", &"x".repeat(64));
        match s.finish() {
            Err(EncodeError::CapacityExceeded { capacity }) => assert_eq!(capacity, 32),
            other => panic!("expected capacity error, got {other:?}"),
        }
    }

    #[test]
    fn test_begin_resets_overflow() {
        let mut s = scratch(32);
        s.begin("1");
        s.attr_str("cf:pathname", &"x".repeat(64));
        assert!(s.finish().is_err());
        s.begin("2");
        s.attr_u32("cf:pid", 1);
        assert_eq!(s.finish().unwrap().as_str(), "\"cf:2\":{\"cf:pid\":1}");
    }
}
