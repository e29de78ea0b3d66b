//! Interfaces of the containers and tasks a checkpoint is taken from.
//!
//! These are implemented by whatever manages container state. The crate
//! ships a file-backed implementation in [`crate::local`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::digest::Digest;
use crate::error::Result;
use crate::request::CheckpointRequest;

/// Label set on every image produced by a checkpoint.
pub const CHECKPOINT_LABEL: &str = "containerd.io/checkpoint";

pub trait Client {
    fn load_container(&self, id: &str) -> Result<Box<dyn Container>>;
}

pub trait Container {
    fn id(&self) -> &str;

    fn info(&self) -> Result<ContainerInfo>;

    /// The container's running task.
    fn task(&self) -> Result<Box<dyn Task>>;
}

pub trait Task {
    fn id(&self) -> &str;

    /// Capture the task's state and store it as an image.
    fn checkpoint(&self, request: CheckpointRequest) -> Result<CheckpointArtifact>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: String,
    pub runtime: RuntimeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// The image a checkpoint was stored as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointArtifact {
    pub name: String,
    pub target: Digest,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl CheckpointArtifact {
    pub fn name(&self) -> &str {
        &self.name
    }
}
