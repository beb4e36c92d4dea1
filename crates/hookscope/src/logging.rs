//! Logging setup for the CLI

use tracing_subscriber::EnvFilter;

/// Maps `-v` occurrences to a default level.
fn level_for(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initialize console logging on stderr.
///
/// `RUST_LOG` overrides the level picked from `verbose`. Stdout stays reserved
/// for check output and JSON.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .from_env_lossy();

    // A second init (e.g. in tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1)
        .try_init();
}
