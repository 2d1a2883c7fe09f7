//! Tracing setup for the CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "footwears_deploy=info,warn";

/// Install the global subscriber, honoring RUST_LOG
///
/// `verbose` raises this crate to debug when RUST_LOG is unset.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "footwears_deploy=debug,warn"
    } else {
        DEFAULT_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // Logs go to stderr so --json output stays parseable.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(env_filter)
        .try_init();
}
