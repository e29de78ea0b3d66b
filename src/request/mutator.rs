use tracing::trace;

use super::CheckpointRequest;
use crate::digest::Digest;
use crate::error::{Error, Result};
use crate::lineage;
use crate::runtime::{RuntimeOptions, RuntimeVariant};

/// One deferred change to a [`CheckpointRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutator {
    /// Stop the task after the checkpoint is taken
    SetExit,
    /// Enable memory tracking for incremental checkpoints
    SetTrackMem,
    /// Record the checkpoint this one derives from
    SetParent(Digest),
}

impl Mutator {
    /// Parse `digest` and wrap it as a [`Mutator::SetParent`].
    pub fn parent(digest: &str) -> Result<Self> {
        Ok(Mutator::SetParent(Digest::parse(digest)?))
    }

    /// Apply this change to `request` using the options shape of `runtime`.
    ///
    /// Options mutators allocate the payload when the request has none and
    /// otherwise update the existing payload in place. A payload of another
    /// shape is never replaced: the call fails with
    /// [`Error::VariantMismatch`] and leaves the request untouched.
    pub fn apply(&self, request: &mut CheckpointRequest, runtime: RuntimeVariant) -> Result<()> {
        trace!(mutator = ?self, %runtime, "applying checkpoint mutator");
        match self {
            Mutator::SetExit => options_for(request, runtime)?.set_exit(),
            Mutator::SetTrackMem => options_for(request, runtime)?.set_track_mem(),
            Mutator::SetParent(digest) => lineage::set_parent(request, digest.clone()),
        }
        Ok(())
    }
}

/// The request's options payload for `runtime`, allocated on first use.
fn options_for(
    request: &mut CheckpointRequest,
    runtime: RuntimeVariant,
) -> Result<&mut RuntimeOptions> {
    if let Some(existing) = &request.options {
        if existing.variant() != runtime {
            return Err(Error::VariantMismatch {
                expected: runtime,
                found: existing.variant(),
            });
        }
    }
    Ok(request
        .options
        .get_or_insert_with(runtime.options_factory()))
}

/// Translate command-line intents into the ordered mutator list.
///
/// An empty `parent` string means no parent checkpoint.
pub fn mutators_from_flags(
    exit: bool,
    track_mem: bool,
    parent: Option<&str>,
) -> Result<Vec<Mutator>> {
    let mut mutators = Vec::new();
    if exit {
        mutators.push(Mutator::SetExit);
    }
    if track_mem {
        mutators.push(Mutator::SetTrackMem);
    }
    if let Some(digest) = parent.filter(|d| !d.is_empty()) {
        mutators.push(Mutator::parent(digest)?);
    }
    Ok(mutators)
}
