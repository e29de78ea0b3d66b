//! Submits a finished checkpoint request to its task.

use tracing::{debug, info};

use crate::error::Result;
use crate::request::CheckpointRequest;
use crate::task::{CheckpointArtifact, Task};

/// Hand `request` to `task` and return the stored checkpoint image.
///
/// Errors from the task are returned unchanged; nothing is retried.
pub fn execute(task: &dyn Task, request: CheckpointRequest) -> Result<CheckpointArtifact> {
    debug!(
        task = task.id(),
        options = ?request.options.as_ref().map(|o| o.variant()),
        exit = request.exit(),
        track_mem = request.track_mem(),
        parent = ?request.parent_checkpoint.as_ref().map(|d| d.as_str()),
        "submitting checkpoint request"
    );
    let artifact = task.checkpoint(request)?;
    info!(
        task = task.id(),
        image = %artifact.name,
        target = %artifact.target,
        "checkpoint created"
    );
    Ok(artifact)
}
