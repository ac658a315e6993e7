//! Log output for programs built on rail-core

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Finder and sync events at info, dependencies at warn.
pub const DEFAULT_FILTER: &str = "warn,rail_core=info,rail_fs=info";

/// Install a compact stdout subscriber filtered by [`DEFAULT_FILTER`].
///
/// `RUST_LOG` takes precedence when set. Fails if a global subscriber is
/// already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`], with `default_filter` used when `RUST_LOG` is unset.
pub fn init_with(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).compact())
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
