//! Client configuration.
//!
//! Values are layered: built-in defaults, then `config.toml`, then
//! environment variables, then command-line flags.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runtime::RUNTIME_RUNC_V2;
use crate::validation::validate_id;

pub const CONFIG_ENV: &str = "CTR_CHECKPOINT_CONFIG";
pub const ROOT_ENV: &str = "CTR_CHECKPOINT_ROOT";
pub const NAMESPACE_ENV: &str = "CONTAINERD_NAMESPACE";

pub const DEFAULT_NAMESPACE: &str = "default";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// State root holding containers, tasks, images and content
    pub root: PathBuf,
    pub namespace: String,
    /// Runtime reported for containers created without one
    pub default_runtime: String,
    /// Log filter directive, e.g. `debug` or `ctr_checkpoint=trace`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_runtime: RUNTIME_RUNC_V2.to_string(),
            log_level: None,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers in place.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub namespace: Option<String>,
    pub runtime: Option<String>,
    pub log_level: Option<String>,
}

fn default_root() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ctr-checkpoint")
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Parse a config file. Keys it leaves out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| Error::io("failed to read config", path, e))?;
        toml::from_str(&content).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the effective configuration.
    ///
    /// The config file is `--config`, else `$CTR_CHECKPOINT_CONFIG`, else
    /// `config.toml` in the state root when it exists. An explicitly named
    /// file must exist. The resulting namespace must be a valid identifier
    /// whichever layer it came from.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let root_hint = overrides
            .root
            .clone()
            .or_else(|| env_var(ROOT_ENV).map(PathBuf::from));

        let explicit = overrides
            .config
            .clone()
            .or_else(|| env_var(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let implicit = root_hint.clone().unwrap_or_else(default_root).join(CONFIG_FILE);
                if implicit.exists() {
                    Self::from_file(&implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(root) = root_hint {
            config.root = root;
        }
        if let Some(namespace) = env_var(NAMESPACE_ENV) {
            config.namespace = namespace;
        }
        if let Some(namespace) = &overrides.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(runtime) = &overrides.runtime {
            config.default_runtime = runtime.clone();
        }
        if let Some(level) = &overrides.log_level {
            config.log_level = Some(level.clone());
        }
        validate_id(&config.namespace)?;
        Ok(config)
    }
}
