//! Advisory-locked state files
//!
//! A [`LockedFile`] holds an `fs2` lock for as long as it lives. Shared locks
//! guard plain reads. An exclusive lock guards a write, or a whole
//! read-modify-write cycle when the same handle reads and then replaces the
//! contents. Every writer in this crate goes through this type.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An open state file and the lock held on it. Dropping it releases the lock.
#[derive(Debug)]
pub struct LockedFile {
    file: File,
    path: PathBuf,
}

impl LockedFile {
    /// Open an existing file for reading under a shared lock.
    pub fn shared(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io("failed to open", path, e))?;
        file.lock_shared()
            .map_err(|e| Error::io("failed to acquire shared lock", path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Open or create a file under an exclusive lock.
    ///
    /// Existing contents are left alone until [`LockedFile::replace`].
    pub fn exclusive(path: &Path) -> Result<Self> {
        #[allow(clippy::suspicious_open_options)]
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .map_err(|e| Error::io("failed to open for writing", path, e))?;
        file.lock_exclusive()
            .map_err(|e| Error::io("failed to acquire exclusive lock", path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The whole file, read from the start.
    pub fn contents(&mut self) -> Result<String> {
        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io("failed to seek", &self.path, e))?;
        let mut content = String::new();
        self.file
            .read_to_string(&mut content)
            .map_err(|e| Error::io("failed to read", &self.path, e))?;
        Ok(content)
    }

    /// Replace the file's contents without giving up the lock.
    pub fn replace(&mut self, content: &str) -> Result<()> {
        self.file
            .set_len(0)
            .map_err(|e| Error::io("failed to truncate", &self.path, e))?;
        self.file
            .seek(SeekFrom::Start(0))
            .map_err(|e| Error::io("failed to seek", &self.path, e))?;
        self.file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io("failed to write", &self.path, e))?;
        self.file
            .flush()
            .map_err(|e| Error::io("failed to flush", &self.path, e))
    }
}
