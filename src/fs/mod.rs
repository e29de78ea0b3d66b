//! On-disk state for the local backend.
//!
//! Layout under the state root:
//!
//! ```text
//! <root>/content/blobs/<algorithm>/<encoded>
//! <root>/<namespace>/containers/<id>.toml
//! <root>/<namespace>/tasks/<id>.toml
//! <root>/<namespace>/images.toml
//! ```

pub mod content;
pub mod images;
pub mod locking;
pub mod records;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use locking::LockedFile;

/// Paths of one namespace inside a state root.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
    namespace: String,
}

impl StateDir {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn namespace_dir(&self) -> PathBuf {
        self.root.join(&self.namespace)
    }

    pub fn containers_dir(&self) -> PathBuf {
        self.namespace_dir().join("containers")
    }

    pub fn container_path(&self, id: &str) -> PathBuf {
        self.containers_dir().join(format!("{id}.toml"))
    }

    pub fn tasks_dir(&self) -> PathBuf {
        self.namespace_dir().join("tasks")
    }

    pub fn task_path(&self, id: &str) -> PathBuf {
        self.tasks_dir().join(format!("{id}.toml"))
    }

    pub fn images_path(&self) -> PathBuf {
        self.namespace_dir().join("images.toml")
    }

    pub fn blobs_dir(&self) -> PathBuf {
        self.root.join("content").join("blobs")
    }
}

/// Create `dir` and its parents if missing.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io("failed to create directory", dir, e))?;
    }
    Ok(())
}

/// Read a TOML record under a shared lock, `None` if the file does not exist.
pub(crate) fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = LockedFile::shared(path)?.contents()?;
    decode(path, &content).map(Some)
}

/// Write a TOML record under an exclusive lock, creating parent directories.
pub(crate) fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let content = toml::to_string_pretty(record)?;
    LockedFile::exclusive(path)?.replace(&content)
}

/// Load, change and store a TOML record while holding one exclusive lock.
///
/// A missing or empty file starts from `T::default()`. When `f` fails the
/// file is left as it was.
pub(crate) fn update_record<T, R, F>(path: &Path, f: F) -> Result<R>
where
    T: DeserializeOwned + Serialize + Default,
    F: FnOnce(&mut T) -> Result<R>,
{
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = LockedFile::exclusive(path)?;
    let content = file.contents()?;
    let mut record = if content.trim().is_empty() {
        T::default()
    } else {
        decode(path, &content)?
    };
    let out = f(&mut record)?;
    file.replace(&toml::to_string_pretty(&record)?)?;
    Ok(out)
}

fn decode<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    toml::from_str(content).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}
