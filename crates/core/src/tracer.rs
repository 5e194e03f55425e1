//! Tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TracerError(String);

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` directives take precedence; `level` is the default directive
/// when it is unset, falling back to `info`.
pub fn init_tracer(level: Option<LevelFilter>) -> Result<(), TracerError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.unwrap_or(LevelFilter::INFO).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| TracerError(e.to_string()))
}
