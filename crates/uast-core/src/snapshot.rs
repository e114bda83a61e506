//! Snapshot envelope for persisting a UAST tree between processes.

use crate::tree::Value;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCHEMA_VERSION: u32 = 1;

/// Versioned wrapper around the portable tree artifact, with minimal
/// provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub schema_version: u32,
    pub tool_version: String,
    /// Milliseconds since UNIX epoch when the snapshot was produced.
    pub created_ms: u64,
    pub root: Value,
}

impl Snapshot {
    pub fn new(root: Value) -> Snapshot {
        let created_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Snapshot {
            schema_version: SCHEMA_VERSION,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            created_ms,
            root,
        }
    }
}

pub fn load_snapshot_from_file(path: &Path) -> Result<Snapshot> {
    let contents = fs::read_to_string(path)?;
    load_snapshot_from_str(&contents)
}

pub fn load_snapshot_from_reader(mut reader: impl Read) -> Result<Snapshot> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    load_snapshot_from_str(&buf)
}

pub fn load_snapshot_from_str(contents: &str) -> Result<Snapshot> {
    // The root tree can be arbitrarily deep; the tree deserializer grows
    // the stack itself, so the frame budget is lifted here.
    let mut deserializer = serde_json::Deserializer::from_str(contents);
    deserializer.disable_recursion_limit();
    let snapshot = Snapshot::deserialize(&mut deserializer)?;
    deserializer.end()?;
    if snapshot.schema_version > SCHEMA_VERSION {
        bail!(
            "snapshot schema version {} is newer than supported version {}",
            snapshot.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(snapshot)
}

pub fn write_snapshot_to_file(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let contents = serde_json::to_string_pretty(snapshot)?;
    debug!("writing snapshot to {}", path.display());
    fs::write(path, contents)?;
    Ok(())
}

pub fn write_snapshot_to_string(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
