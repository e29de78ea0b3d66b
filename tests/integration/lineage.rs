//! Parent checkpoint links

use ctr_checkpoint::commands::checkpoint::{execute, CheckpointArgs};
use ctr_checkpoint::{Error, ErrorKind};

use super::helpers::*;

const PARENT: &str = "sha256:abc1230000000000000000000000000000000000000000000000000000000000";

/// Scenario: parent digest is recorded verbatim
#[test]
fn test_parent_checkpoint_recorded_verbatim() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            track_mem: true,
            parent_checkpoint: Some(PARENT.to_string()),
            ..args("redis")
        },
    )
    .unwrap();

    let index = root.read_index(&artifact);
    assert_eq!(index.parent_checkpoint.unwrap().as_str(), PARENT);
}

/// A parent that was never stored is still accepted
#[test]
fn test_parent_existence_is_not_checked() {
    let root = TestRoot::new();
    root.running_container("redis", Some("some-other-runtime"));

    let artifact = execute(
        &root.client(),
        CheckpointArgs {
            parent_checkpoint: Some(PARENT.to_string()),
            ..args("redis")
        },
    )
    .unwrap();
    assert!(root.read_index(&artifact).options.is_none());
}

/// The previous checkpoint's target can serve as the next parent
#[test]
fn test_chained_checkpoints() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let first = execute(
        &root.client(),
        CheckpointArgs {
            track_mem: true,
            ..args("redis")
        },
    )
    .unwrap();

    // Image names have one-second resolution.
    std::thread::sleep(std::time::Duration::from_millis(1100));

    let second = execute(
        &root.client(),
        CheckpointArgs {
            track_mem: true,
            parent_checkpoint: Some(first.target.to_string()),
            ..args("redis")
        },
    )
    .unwrap();

    assert_ne!(first.name(), second.name());
    assert_eq!(
        root.read_index(&second).parent_checkpoint,
        Some(first.target.clone())
    );
}

#[test]
fn test_malformed_parent_is_input_error() {
    let root = TestRoot::new();
    root.running_container("redis", Some("io.containerd.runc.v1"));

    let err = execute(
        &root.client(),
        CheckpointArgs {
            parent_checkpoint: Some("abc123".to_string()),
            ..args("redis")
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Digest(_)));
    assert_eq!(err.kind(), ErrorKind::Input);
}
