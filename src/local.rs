//! File-backed containers and tasks.
//!
//! The local backend keeps container and task records under a state root
//! (see [`crate::fs`]) and stores each checkpoint as a JSON index blob plus a
//! named image record. Process state itself is not captured here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::fs::content::ContentStore;
use crate::fs::images::{ImageRecord, ImageStore};
use crate::fs::records::{
    read_container, read_task, write_task, ContainerRecord, TaskRecord, TaskStatus,
};
use crate::fs::StateDir;
use crate::request::CheckpointRequest;
use crate::runtime::MarshaledOptions;
use crate::task::{
    CheckpointArtifact, Client, Container, ContainerInfo, RuntimeInfo, Task, CHECKPOINT_LABEL,
};

const CHECKPOINT_NAME_PREFIX: &str = "containerd.io/checkpoint";
const CHECKPOINT_DATE_FORMAT: &str = "%m-%d-%Y-%H:%M:%S";

/// Default image name for a checkpoint of task `id` taken at `at`.
pub fn checkpoint_name(id: &str, at: DateTime<Utc>) -> String {
    format!(
        "{CHECKPOINT_NAME_PREFIX}/{id}:{}",
        at.format(CHECKPOINT_DATE_FORMAT)
    )
}

/// Document stored as the target of a checkpoint image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointIndex {
    pub container_id: String,
    pub runtime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_checkpoint: Option<Digest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<MarshaledOptions>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LocalClient {
    state: StateDir,
    default_runtime: String,
}

impl LocalClient {
    /// `default_runtime` is reported for containers whose record names none.
    pub fn new(state: StateDir, default_runtime: impl Into<String>) -> Self {
        Self {
            state,
            default_runtime: default_runtime.into(),
        }
    }

    pub fn state(&self) -> &StateDir {
        &self.state
    }
}

impl Client for LocalClient {
    fn load_container(&self, id: &str) -> Result<Box<dyn Container>> {
        let record = read_container(&self.state, id)?
            .ok_or_else(|| Error::ContainerNotFound(id.to_string()))?;
        debug!(container = id, namespace = self.state.namespace(), "loaded container");
        Ok(Box::new(LocalContainer {
            state: self.state.clone(),
            runtime: record
                .runtime
                .clone()
                .unwrap_or_else(|| self.default_runtime.clone()),
            record,
        }))
    }
}

struct LocalContainer {
    state: StateDir,
    record: ContainerRecord,
    runtime: String,
}

impl Container for LocalContainer {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn info(&self) -> Result<ContainerInfo> {
        Ok(ContainerInfo {
            id: self.record.id.clone(),
            runtime: RuntimeInfo {
                name: self.runtime.clone(),
            },
            image: self.record.image.clone(),
            labels: self.record.labels.clone(),
        })
    }

    fn task(&self) -> Result<Box<dyn Task>> {
        if read_task(&self.state, &self.record.id)?.is_none() {
            return Err(Error::TaskNotFound(self.record.id.clone()));
        }
        Ok(Box::new(LocalTask {
            state: self.state.clone(),
            id: self.record.id.clone(),
            runtime: self.runtime.clone(),
            image: self.record.image.clone(),
        }))
    }
}

struct LocalTask {
    state: StateDir,
    id: String,
    runtime: String,
    image: Option<String>,
}

impl LocalTask {
    fn set_status(&self, pid: u32, status: TaskStatus) -> Result<()> {
        write_task(&self.state, &self.id, &TaskRecord { pid, status })
    }

    fn store_checkpoint(&self, request: &CheckpointRequest) -> Result<CheckpointArtifact> {
        let created_at = Utc::now();
        let index = CheckpointIndex {
            container_id: self.id.clone(),
            runtime: self.runtime.clone(),
            image: self.image.clone(),
            parent_checkpoint: request.parent_checkpoint.clone(),
            options: request.options.as_ref().map(|o| o.marshal()).transpose()?,
            created_at,
        };
        let data = serde_json::to_vec_pretty(&index)?;
        let target = ContentStore::new(&self.state).write_blob(&data)?;

        let name = checkpoint_name(&self.id, created_at);
        let labels = BTreeMap::from([(CHECKPOINT_LABEL.to_string(), "true".to_string())]);
        let record = ImageRecord {
            target: target.clone(),
            size: data.len() as u64,
            labels: labels.clone(),
            created_at,
        };
        ImageStore::update(&self.state, |images| images.create(&name, record))?;

        Ok(CheckpointArtifact {
            name,
            target,
            labels,
        })
    }
}

impl Task for LocalTask {
    fn id(&self) -> &str {
        &self.id
    }

    fn checkpoint(&self, request: CheckpointRequest) -> Result<CheckpointArtifact> {
        let task = read_task(&self.state, &self.id)?
            .ok_or_else(|| Error::TaskNotFound(self.id.clone()))?;
        if task.status == TaskStatus::Stopped {
            return Err(Error::TaskNotRunning {
                id: self.id.clone(),
                status: task.status.to_string(),
            });
        }

        // Paused for the duration of the checkpoint, then back to where it was.
        self.set_status(task.pid, TaskStatus::Paused)?;
        let result = self.store_checkpoint(&request);

        let next = match &result {
            Ok(_) if request.exit() => TaskStatus::Stopped,
            _ => task.status,
        };
        if let Err(e) = self.set_status(task.pid, next) {
            warn!(task = %self.id, error = %e, "failed to restore task status after checkpoint");
            if result.is_ok() {
                return Err(e);
            }
        }
        debug!(task = %self.id, status = %next, "task status after checkpoint");
        result
    }
}
