//! Runtime variants and the checkpoint option shapes they accept.
//!
//! The runtime a task was created with decides which options payload it
//! understands. Names are resolved once, through the registry table below;
//! anything that is not a recognized runc shim uses the legacy shape.

mod options;

pub use options::{LinuxCheckpointOptions, MarshaledOptions, RuncCheckpointOptions, RuntimeOptions};

use std::fmt;

/// Runtime name of the runc v1 shim.
pub const RUNTIME_RUNC_V1: &str = "io.containerd.runc.v1";

/// Runtime name of the runc v2 shim.
pub const RUNTIME_RUNC_V2: &str = "io.containerd.runc.v2";

/// Runtime name of the legacy in-daemon linux runtime.
pub const RUNTIME_LINUX_V1: &str = "io.containerd.runtime.v1.linux";

/// Shape used for every runtime name not listed in [`MODERN_RUNTIMES`].
pub const DEFAULT_VARIANT: RuntimeVariant = RuntimeVariant::Legacy;

/// Runtime names that take the runc shim options.
const MODERN_RUNTIMES: &[(&str, RuntimeVariant)] = &[
    (RUNTIME_RUNC_V1, RuntimeVariant::RuncV1),
    (RUNTIME_RUNC_V2, RuntimeVariant::RuncV1),
];

/// Which checkpoint options shape a runtime accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeVariant {
    /// runc shim (`containerd.runc.v1.CheckpointOptions`)
    RuncV1,
    /// legacy linux runtime (`containerd.linux.runc.CheckpointOptions`)
    Legacy,
}

pub type OptionsFactory = fn() -> RuntimeOptions;

impl RuntimeVariant {
    /// Resolve a runtime name. Unknown names fall back to [`DEFAULT_VARIANT`].
    pub fn resolve(runtime: &str) -> Self {
        MODERN_RUNTIMES
            .iter()
            .find(|(name, _)| *name == runtime)
            .map(|(_, variant)| *variant)
            .unwrap_or(DEFAULT_VARIANT)
    }

    /// Constructor for a zero-value options payload of this shape.
    pub fn options_factory(self) -> OptionsFactory {
        match self {
            RuntimeVariant::RuncV1 => runc_options,
            RuntimeVariant::Legacy => legacy_options,
        }
    }

    pub fn type_url(self) -> &'static str {
        match self {
            RuntimeVariant::RuncV1 => "containerd.runc.v1.CheckpointOptions",
            RuntimeVariant::Legacy => "containerd.linux.runc.CheckpointOptions",
        }
    }
}

impl fmt::Display for RuntimeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeVariant::RuncV1 => write!(f, "runc.v1"),
            RuntimeVariant::Legacy => write!(f, "legacy"),
        }
    }
}

fn runc_options() -> RuntimeOptions {
    RuntimeOptions::RuncV1(RuncCheckpointOptions::default())
}

fn legacy_options() -> RuntimeOptions {
    RuntimeOptions::Legacy(LinuxCheckpointOptions::default())
}

/// Resolve a runtime name straight to its options constructor.
pub fn resolve_variant(runtime: &str) -> OptionsFactory {
    RuntimeVariant::resolve(runtime).options_factory()
}
