//! Logging setup for the webale CLI.
//!
//! The level is chosen in this order:
//! 1. `--verbose`: debug for the webale crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. warnings for the webale crates
//!
//! Build progress is reported through [`crate::ui`], so the default filter
//! keeps the library's info events out of the terminal.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "webale=debug,webale_config=debug,webale_cli=debug";
const QUIET_FILTER: &str = "webale=error,webale_config=error,webale_cli=error";
const DEFAULT_FILTER: &str = "webale=warn,webale_config=warn,webale_cli=warn";

/// Build the filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
///
/// `color` should come from [`crate::ui::colors_enabled`] so log lines and
/// status messages agree on `NO_COLOR` and non-terminal stderr.
pub fn init_logger(verbose: bool, quiet: bool, color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .compact();

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
