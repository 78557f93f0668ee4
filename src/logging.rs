//! Diagnostic logging.
//!
//! Pipeline progress is reported through `tracing` events on stderr; the
//! command summaries on stdout are unaffected.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `l10nctl=debug`.
pub const LOG_ENV: &str = "L10NCTL_LOG";

/// Install the global subscriber.
///
/// The default level is `warn`, or `debug` with `verbose`. [`LOG_ENV`]
/// overrides both. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
