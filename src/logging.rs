//! Logging init: human-readable events on stderr.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the built-in default when set.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "hgfetch=debug" } else { "hgfetch=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
