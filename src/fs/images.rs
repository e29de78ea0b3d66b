//! Named image records
//!
//! All images of a namespace live in one `images.toml`, keyed by name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{read_record, update_record, StateDir};
use crate::digest::Digest;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub target: Digest,
    pub size: u64,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageStore {
    #[serde(default)]
    pub images: BTreeMap<String, ImageRecord>,
}

impl ImageStore {
    pub fn load(state: &StateDir) -> Result<Self> {
        Ok(read_record(&state.images_path())?.unwrap_or_default())
    }

    /// Run `f` on the namespace's image store and save the result.
    ///
    /// `images.toml` stays exclusively locked from the load to the save, so
    /// concurrent updates are applied one after the other. Nothing is saved
    /// when `f` fails.
    pub fn update<R>(state: &StateDir, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        update_record(&state.images_path(), f)
    }

    pub fn get(&self, name: &str) -> Option<&ImageRecord> {
        self.images.get(name)
    }

    /// Add a new image. Names are never overwritten.
    pub fn create(&mut self, name: &str, record: ImageRecord) -> Result<()> {
        if self.images.contains_key(name) {
            return Err(Error::ImageExists(name.to_string()));
        }
        self.images.insert(name.to_string(), record);
        Ok(())
    }
}
