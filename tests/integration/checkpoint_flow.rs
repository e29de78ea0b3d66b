//! End-to-end checkpoint requests against the local backend

use ctr_checkpoint::commands::checkpoint::{execute, CheckpointArgs};
use ctr_checkpoint::fs::images::ImageStore;
use ctr_checkpoint::fs::records::{read_task, TaskStatus};
use ctr_checkpoint::{Error, ErrorKind};

use super::helpers::*;

/// Scenario: runc v1 container, exit only
#[test]
fn test_runc_v1_exit_only() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            exit: true,
            ..args("redis")
        },
    )
    .expect("checkpoint should succeed");

    let index = root.read_index(&artifact);
    let options = index.options.expect("options recorded");
    assert_eq!(options.type_url, "containerd.runc.v1.CheckpointOptions");
    assert_eq!(options.value["exit"], true);
    assert_eq!(options.value["track_mem"], false);

    let task = read_task(&root.state, "redis").unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Stopped);
}

/// Scenario: runc v1 container, exit and track-mem share one payload
#[test]
fn test_runc_v1_exit_and_track_mem() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            exit: true,
            track_mem: true,
            ..args("redis")
        },
    )
    .unwrap();

    let options = root.read_index(&artifact).options.unwrap();
    assert_eq!(options.type_url, "containerd.runc.v1.CheckpointOptions");
    assert_eq!(options.value["exit"], true);
    assert_eq!(options.value["track_mem"], true);
}

/// Scenario: unrecognized runtime, track-mem uses the legacy payload
#[test]
fn test_other_runtime_track_mem_uses_legacy_options() {
    let root = TestRoot::new();
    root.running_container("web", Some("some-other-runtime"));

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            track_mem: true,
            ..args("web")
        },
    )
    .unwrap();

    let index = root.read_index(&artifact);
    assert_eq!(index.runtime, "some-other-runtime");
    let options = index.options.unwrap();
    assert_eq!(options.type_url, "containerd.linux.runc.CheckpointOptions");
    assert_eq!(options.value["track_mem"], true);
    assert_eq!(options.value["exit"], false);

    let task = read_task(&root.state, "web").unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Running);
}

/// Containers without a recorded runtime use the client default
#[test]
fn test_default_runtime_selects_runc_options() {
    let root = TestRoot::new();
    root.running_container("api", None);

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            exit: true,
            ..args("api")
        },
    )
    .unwrap();

    let index = root.read_index(&artifact);
    assert_eq!(index.runtime, DEFAULT_RUNTIME);
    assert_eq!(
        index.options.unwrap().type_url,
        "containerd.runc.v1.CheckpointOptions"
    );
}

/// No flags: no options payload is sent at all
#[test]
fn test_plain_checkpoint_has_no_options() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let artifact = execute(&root.client(), args("redis")).unwrap();
    assert!(artifact.name().starts_with("containerd.io/checkpoint/redis:"));

    let index = root.read_index(&artifact);
    assert!(index.options.is_none());
    assert!(index.parent_checkpoint.is_none());
    assert_eq!(index.image.as_deref(), Some("docker.io/library/redis:7"));

    let images = ImageStore::load(&root.state).unwrap();
    let image = images.get(artifact.name()).expect("image recorded");
    assert_eq!(image.target, artifact.target);
    assert_eq!(
        image.labels.get("containerd.io/checkpoint").map(String::as_str),
        Some("true")
    );
}

/// Scenario: no container id, nothing is built or executed
#[test]
fn test_missing_container_id() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let err = execute(
        &root.client(),
        CheckpointArgs {
            exit: true,
            ..Default::default()
        },
    )
    .unwrap_err();

    assert!(matches!(err, Error::MissingContainerId));
    assert_eq!(err.kind(), ErrorKind::Input);
    assert!(ImageStore::load(&root.state).unwrap().images.is_empty());
    let task = read_task(&root.state, "redis").unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Running);
}

#[test]
fn test_unknown_container_is_lookup_error() {
    let root = TestRoot::new();

    let err = execute(&root.client(), args("ghost")).unwrap_err();
    assert!(matches!(err, Error::ContainerNotFound(ref id) if id == "ghost"));
    assert_eq!(err.kind(), ErrorKind::Lookup);
}

#[test]
fn test_stopped_task_is_execution_error() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));
    execute(
        &root.client(),
        CheckpointArgs {
            exit: true,
            ..args("redis")
        },
    )
    .unwrap();

    let err = execute(&root.client(), args("redis")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert_eq!(ImageStore::load(&root.state).unwrap().images.len(), 1);
}
