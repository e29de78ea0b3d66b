use tracing::debug;

use super::{CheckpointRequest, Mutator};
use crate::digest::Digest;
use crate::error::Result;
use crate::runtime::RuntimeVariant;

/// Apply `mutators` in order to a fresh request for `runtime`.
///
/// The first failing mutator aborts the build and its error is returned.
pub fn build<I>(mutators: I, runtime: RuntimeVariant) -> Result<CheckpointRequest>
where
    I: IntoIterator<Item = Mutator>,
{
    let mut request = CheckpointRequest::new();
    let mut applied = 0usize;
    for mutator in mutators {
        mutator.apply(&mut request, runtime)?;
        applied += 1;
    }
    debug!(%runtime, applied, "built checkpoint request");
    Ok(request)
}

/// Collects mutators for a single runtime variant and builds the request.
#[derive(Debug, Clone)]
pub struct CheckpointRequestBuilder {
    runtime: RuntimeVariant,
    mutators: Vec<Mutator>,
}

impl CheckpointRequestBuilder {
    pub fn new(runtime: RuntimeVariant) -> Self {
        Self {
            runtime,
            mutators: Vec::new(),
        }
    }

    /// Builder for the variant that `runtime_name` resolves to.
    pub fn for_runtime(runtime_name: &str) -> Self {
        Self::new(RuntimeVariant::resolve(runtime_name))
    }

    pub fn runtime(&self) -> RuntimeVariant {
        self.runtime
    }

    pub fn push(mut self, mutator: Mutator) -> Self {
        self.mutators.push(mutator);
        self
    }

    pub fn extend(mut self, mutators: impl IntoIterator<Item = Mutator>) -> Self {
        self.mutators.extend(mutators);
        self
    }

    pub fn exit(self) -> Self {
        self.push(Mutator::SetExit)
    }

    pub fn track_mem(self) -> Self {
        self.push(Mutator::SetTrackMem)
    }

    pub fn parent(self, digest: Digest) -> Self {
        self.push(Mutator::SetParent(digest))
    }

    pub fn build(self) -> Result<CheckpointRequest> {
        build(self.mutators, self.runtime)
    }
}
