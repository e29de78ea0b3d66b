//! Test helper functions for integration tests

use ctr_checkpoint::commands::checkpoint::CheckpointArgs;
use ctr_checkpoint::fs::content::ContentStore;
use ctr_checkpoint::fs::records::{
    write_container, write_task, ContainerRecord, TaskRecord, TaskStatus,
};
use ctr_checkpoint::fs::StateDir;
use ctr_checkpoint::local::{CheckpointIndex, LocalClient};
use ctr_checkpoint::CheckpointArtifact;
use tempfile::TempDir;

pub const DEFAULT_RUNTIME: &str = "io.containerd.runc.v2";

/// A temporary state root with one namespace.
///
/// The TempDir must be kept in scope for the lifetime of the test.
pub struct TestRoot {
    pub temp: TempDir,
    pub state: StateDir,
}

impl TestRoot {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let state = StateDir::new(temp.path(), "default");
        Self { temp, state }
    }

    pub fn client(&self) -> LocalClient {
        LocalClient::new(self.state.clone(), DEFAULT_RUNTIME)
    }

    /// Register a container with a running task.
    pub fn running_container(&self, id: &str, runtime: Option<&str>) {
        let mut record = ContainerRecord::new(id).with_image("docker.io/library/redis:7");
        record.runtime = runtime.map(str::to_string);
        write_container(&self.state, &record).expect("Failed to write container record");
        write_task(
            &self.state,
            id,
            &TaskRecord {
                pid: 4242,
                status: TaskStatus::Running,
            },
        )
        .expect("Failed to write task record");
    }

    pub fn read_index(&self, artifact: &CheckpointArtifact) -> CheckpointIndex {
        let blob = ContentStore::new(&self.state)
            .read_blob(&artifact.target)
            .expect("Failed to read checkpoint blob");
        serde_json::from_slice(&blob).expect("Failed to parse checkpoint index")
    }
}

pub fn args(container: &str) -> CheckpointArgs {
    CheckpointArgs {
        container_id: Some(container.to_string()),
        ..Default::default()
    }
}
