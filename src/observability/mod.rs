//! Logging setup for hosts embedding the router.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|error| anyhow!("Failed to install tracing subscriber: {error}"))
}
