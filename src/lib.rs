pub mod commands;
pub mod config;
pub mod digest;
pub mod error;
pub mod executor;
pub mod fs;
pub mod lineage;
pub mod local;
pub mod logging;
pub mod request;
pub mod runtime;
pub mod task;
pub mod validation;

pub use digest::Digest;
pub use error::{Error, ErrorKind, Result};
pub use request::{CheckpointRequest, CheckpointRequestBuilder, Mutator};
pub use runtime::{RuntimeOptions, RuntimeVariant};
pub use task::CheckpointArtifact;
