//! Checkpoint requests and the mutators that populate them.
//!
//! A request starts empty, is filled in by an ordered list of [`Mutator`]s
//! resolved against one runtime variant, and is handed to a task exactly once.

mod builder;
mod mutator;

pub use builder::{build, CheckpointRequestBuilder};
pub use mutator::{mutators_from_flags, Mutator};

use crate::digest::Digest;
use crate::runtime::RuntimeOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointRequest {
    /// Runtime-specific options, allocated by the first mutator that needs them
    pub options: Option<RuntimeOptions>,
    /// Checkpoint this one is incrementally derived from
    pub parent_checkpoint: Option<Digest>,
}

impl CheckpointRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the task should be stopped once the checkpoint is taken.
    pub fn exit(&self) -> bool {
        self.options.as_ref().is_some_and(RuntimeOptions::exit)
    }

    pub fn track_mem(&self) -> bool {
        self.options.as_ref().is_some_and(RuntimeOptions::track_mem)
    }
}
