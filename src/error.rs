//! Error types for checkpoint requests and the collaborators that serve them.

use std::path::PathBuf;

use crate::digest::DigestError;
use crate::runtime::RuntimeVariant;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad classification of an [`Error`], used by callers that only care
/// about which stage of a checkpoint operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was missing or malformed
    Input,
    /// The container, task or image could not be resolved
    Lookup,
    /// A mutator met an options payload of the wrong runtime shape
    VariantMismatch,
    /// The checkpoint operation itself failed
    Execution,
    /// Reading or writing local state failed
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container id must be provided")]
    MissingContainerId,

    #[error("invalid identifier {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error("container \"{0}\" not found")]
    ContainerNotFound(String),

    #[error("no task found for container \"{0}\"")]
    TaskNotFound(String),

    #[error(
        "checkpoint options mismatch: request holds {found} options but runtime resolves to {expected}"
    )]
    VariantMismatch {
        expected: RuntimeVariant,
        found: RuntimeVariant,
    },

    #[error("task \"{id}\" is {status}, checkpoint requires a running task")]
    TaskNotRunning { id: String, status: String },

    #[error("image \"{0}\" already exists")]
    ImageExists(String),

    #[error("checkpoint of task \"{id}\" failed: {reason}")]
    Checkpoint { id: String, reason: String },

    #[error("{context}: {}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode record")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to encode checkpoint payload")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingContainerId | Error::InvalidId { .. } | Error::Digest(_) => {
                ErrorKind::Input
            }
            Error::ContainerNotFound(_) | Error::TaskNotFound(_) => ErrorKind::Lookup,
            Error::VariantMismatch { .. } => ErrorKind::VariantMismatch,
            Error::TaskNotRunning { .. } | Error::ImageExists(_) | Error::Checkpoint { .. } => {
                ErrorKind::Execution
            }
            Error::Io { .. } | Error::Decode { .. } | Error::Encode(_) | Error::Json(_) => {
                ErrorKind::Storage
            }
        }
    }

    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            context,
            path: path.into(),
            source,
        }
    }
}
