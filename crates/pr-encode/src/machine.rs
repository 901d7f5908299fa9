//! One-shot machine descriptor document.
//!
//! Announces the identity of the host and runtime producing the stream.
//! Built independently of the category buffers and emitted once by the
//! caller, typically before steady-state traffic starts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pr_common::{AuditChannel, PREFIX_JSON};

use crate::clock::WallClock;
use crate::error::{EncodeError, MachineError};
use crate::scratch::EncodeScratch;

const LSM_LIST: &str = "/sys/kernel/security/lsm";

/// Identity of the capturing host and runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub machine_id: u32,
    /// Version of the kernel capture module.
    pub capture_version: String,
    /// Version of this library.
    pub relay_version: String,
    pub sysname: String,
    pub nodename: String,
    pub release: String,
    pub version: String,
    pub machine: String,
    /// Comma-separated active security modules, empty when unreadable.
    pub lsms: String,
}

impl MachineInfo {
    /// Collect host identity from the channel, `uname(2)`, and securityfs.
    ///
    /// The LSM list is best-effort: containers and locked-down hosts often
    /// hide securityfs, which only costs us that one field.
    pub fn collect(channel: &dyn AuditChannel) -> Result<Self, MachineError> {
        let machine_id = channel.machine_id()?;
        let capture_version = channel.capture_version()?;
        let uts = uname()?;
        Ok(MachineInfo {
            machine_id,
            capture_version,
            relay_version: env!("CARGO_PKG_VERSION").to_string(),
            sysname: uts.sysname,
            nodename: uts.nodename,
            release: uts.release,
            version: uts.version,
            machine: uts.machine,
            lsms: read_lsm_list(),
        })
    }
}

/// Render the machine descriptor as a standalone document.
///
/// Refreshes the shared clock first so the descriptor carries a current
/// date. The entity is keyed by the numeric machine id.
pub fn machine_description(
    info: &MachineInfo,
    clock: &Arc<WallClock>,
    capacity: usize,
) -> Result<String, EncodeError> {
    clock.refresh();
    let mut scratch = EncodeScratch::new(Arc::clone(clock), capacity);
    let machine_id = info.machine_id.to_string();
    scratch.begin(&machine_id);
    scratch.attr_label(Some("machine"), Some(&machine_id));
    scratch.attr_str("cf:camflow", &info.capture_version);
    scratch.attr_str("cf:libprovenance", &info.relay_version);
    scratch.attr_str("cf:sysname", &info.sysname);
    scratch.attr_str("cf:nodename", &info.nodename);
    scratch.attr_str("cf:release", &info.release);
    scratch.attr_str("cf:version", &info.version);
    scratch.attr_str("cf:machine", &info.machine);
    scratch.attr_str("cf:lsm_list", &info.lsms);
    scratch.attr_date();
    let fragment = scratch.finish()?;

    let mut doc = String::with_capacity(fragment.len() + PREFIX_JSON.len() + 32);
    doc.push_str("{\"prefix\":{");
    doc.push_str(PREFIX_JSON);
    doc.push_str("},\"entity\":{");
    doc.push_str(fragment.as_str());
    doc.push_str("}}");
    Ok(doc)
}

struct Utsname {
    sysname: String,
    nodename: String,
    release: String,
    version: String,
    machine: String,
}

fn uname() -> Result<Utsname, std::io::Error> {
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut uts) } != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(Utsname {
        sysname: cstr_field(&uts.sysname),
        nodename: cstr_field(&uts.nodename),
        release: cstr_field(&uts.release),
        version: cstr_field(&uts.version),
        machine: cstr_field(&uts.machine),
    })
}

fn cstr_field(field: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn read_lsm_list() -> String {
    match std::fs::read_to_string(LSM_LIST) {
        Ok(list) => list.trim().to_string(),
        Err(err) => {
            tracing::warn!(%err, "security module list unavailable");
            String::new()
        }
    }
}
