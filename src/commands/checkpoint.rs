//! Checkpoint command implementation
//!
//! Usage: ctr-checkpoint checkpoint [--exit] [--track-mem] [--parent-checkpoint DIGEST] CONTAINER

use tracing::debug;

use crate::error::{Error, Result};
use crate::executor;
use crate::request::{self, mutators_from_flags};
use crate::runtime::RuntimeVariant;
use crate::task::{CheckpointArtifact, Client};
use crate::validation::validate_id;

/// Inputs of one checkpoint invocation.
#[derive(Debug, Clone, Default)]
pub struct CheckpointArgs {
    pub container_id: Option<String>,
    /// Stop the container after the checkpoint
    pub exit: bool,
    /// Track memory changes for incremental checkpoints
    pub track_mem: bool,
    /// Digest of the checkpoint image this one derives from
    pub parent_checkpoint: Option<String>,
}

/// Execute the checkpoint command
///
/// Resolves the container's task and runtime, builds the request for that
/// runtime's options shape and submits it. Nothing is looked up when the
/// container id is missing.
pub fn execute(client: &dyn Client, args: CheckpointArgs) -> Result<CheckpointArtifact> {
    let id = match args.container_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(Error::MissingContainerId),
    };
    validate_id(id)?;

    let container = client.load_container(id)?;
    let task = container.task()?;
    let info = container.info()?;

    let runtime = RuntimeVariant::resolve(&info.runtime.name);
    debug!(
        container = id,
        runtime = %info.runtime.name,
        variant = %runtime,
        "resolved checkpoint options shape"
    );

    let mutators = mutators_from_flags(
        args.exit,
        args.track_mem,
        args.parent_checkpoint.as_deref(),
    )?;
    let request = request::build(mutators, runtime)?;

    executor::execute(task.as_ref(), request)
}
