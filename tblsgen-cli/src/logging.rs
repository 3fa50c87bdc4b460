//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// Nothing is installed unless `verbose` is set or `RUST_LOG` is present.
/// `RUST_LOG` wins over the level implied by `verbose`.
pub fn init(verbose: bool) {
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    if !verbose && !from_env {
        return;
    }

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
