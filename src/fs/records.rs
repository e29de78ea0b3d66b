//! Container and task records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{read_record, write_record, StateDir};
use crate::error::Result;

/// Stored metadata of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub id: String,
    /// Runtime the container was created with; the client default if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ContainerRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            runtime: None,
            image: None,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Paused,
    Stopped,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Paused => write!(f, "paused"),
            TaskStatus::Stopped => write!(f, "stopped"),
        }
    }
}

/// Stored state of a container's task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub pid: u32,
    pub status: TaskStatus,
}

pub fn read_container(state: &StateDir, id: &str) -> Result<Option<ContainerRecord>> {
    read_record(&state.container_path(id))
}

pub fn write_container(state: &StateDir, record: &ContainerRecord) -> Result<()> {
    write_record(&state.container_path(&record.id), record)
}

pub fn read_task(state: &StateDir, id: &str) -> Result<Option<TaskRecord>> {
    read_record(&state.task_path(id))
}

pub fn write_task(state: &StateDir, id: &str, record: &TaskRecord) -> Result<()> {
    write_record(&state.task_path(id), record)
}
