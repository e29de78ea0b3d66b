//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr; stdout is reserved for command output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "CTR_CHECKPOINT_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive: the `--log-level` flag, then
/// `$CTR_CHECKPOINT_LOG` or `$RUST_LOG`, then the config file, then `warn`.
pub fn filter_directive(flag: Option<&str>, configured: Option<&str>) -> String {
    if let Some(level) = flag {
        return level.to_string();
    }
    [LOG_ENV, "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Install the global subscriber. Invalid directives fall back to the default level.
pub fn init(directive: &str) {
    let filter =
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
