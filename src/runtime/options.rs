//! Runtime-specific checkpoint option payloads.
//!
//! Both shapes carry the same runc directives but are distinct types on the
//! wire, identified by their type URL. A task only accepts the payload that
//! matches the runtime it was created with.

use serde::{Deserialize, Serialize};

use super::RuntimeVariant;

/// Checkpoint options understood by the `io.containerd.runc.v1` shim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuncCheckpointOptions {
    /// Stop the container after checkpointing
    pub exit: bool,
    pub open_tcp: bool,
    pub external_unix_sockets: bool,
    pub terminal: bool,
    pub file_locks: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub empty_namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cgroups_mode: String,
    /// Track memory changes for incremental (pre-dump) checkpoints
    pub track_mem: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub work_path: String,
}

/// Checkpoint options understood by the legacy linux runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinuxCheckpointOptions {
    /// Stop the container after checkpointing
    pub exit: bool,
    pub open_tcp: bool,
    pub external_unix_sockets: bool,
    pub terminal: bool,
    pub file_locks: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub empty_namespaces: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cgroups_mode: String,
    /// Track memory changes for incremental (pre-dump) checkpoints
    pub track_mem: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub work_path: String,
}

/// The options slot of a checkpoint request: exactly one concrete shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeOptions {
    RuncV1(RuncCheckpointOptions),
    Legacy(LinuxCheckpointOptions),
}

/// Options serialized together with the type URL that identifies their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarshaledOptions {
    pub type_url: String,
    pub value: serde_json::Value,
}

impl RuntimeOptions {
    pub fn variant(&self) -> RuntimeVariant {
        match self {
            RuntimeOptions::RuncV1(_) => RuntimeVariant::RuncV1,
            RuntimeOptions::Legacy(_) => RuntimeVariant::Legacy,
        }
    }

    pub fn exit(&self) -> bool {
        match self {
            RuntimeOptions::RuncV1(o) => o.exit,
            RuntimeOptions::Legacy(o) => o.exit,
        }
    }

    pub fn track_mem(&self) -> bool {
        match self {
            RuntimeOptions::RuncV1(o) => o.track_mem,
            RuntimeOptions::Legacy(o) => o.track_mem,
        }
    }

    pub(crate) fn set_exit(&mut self) {
        match self {
            RuntimeOptions::RuncV1(o) => o.exit = true,
            RuntimeOptions::Legacy(o) => o.exit = true,
        }
    }

    pub(crate) fn set_track_mem(&mut self) {
        match self {
            RuntimeOptions::RuncV1(o) => o.track_mem = true,
            RuntimeOptions::Legacy(o) => o.track_mem = true,
        }
    }

    pub fn marshal(&self) -> serde_json::Result<MarshaledOptions> {
        let value = match self {
            RuntimeOptions::RuncV1(o) => serde_json::to_value(o)?,
            RuntimeOptions::Legacy(o) => serde_json::to_value(o)?,
        };
        Ok(MarshaledOptions {
            type_url: self.variant().type_url().to_string(),
            value,
        })
    }
}
