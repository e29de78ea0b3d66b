//! Content-addressed blob storage.

use std::fs;
use std::path::PathBuf;

use super::{ensure_dir, StateDir};
use crate::digest::Digest;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ContentStore {
    blobs: PathBuf,
}

impl ContentStore {
    pub fn new(state: &StateDir) -> Self {
        Self {
            blobs: state.blobs_dir(),
        }
    }

    pub fn blob_path(&self, digest: &Digest) -> PathBuf {
        self.blobs.join(digest.algorithm()).join(digest.encoded())
    }

    /// Store `data` under its sha256 digest. Existing blobs are left as is.
    pub fn write_blob(&self, data: &[u8]) -> Result<Digest> {
        let digest = Digest::from_sha256_bytes(data);
        let path = self.blob_path(&digest);
        if path.exists() {
            return Ok(digest);
        }
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }

        // Write under a temporary name first so readers never see a partial blob.
        let tmp = path.with_extension("ingest");
        fs::write(&tmp, data).map_err(|e| Error::io("failed to write blob", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| Error::io("failed to commit blob", &path, e))?;
        Ok(digest)
    }

    pub fn read_blob(&self, digest: &Digest) -> Result<Vec<u8>> {
        let path = self.blob_path(digest);
        fs::read(&path).map_err(|e| Error::io("failed to read blob", path, e))
    }
}
