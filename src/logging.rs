//! logging
//!
//! Tracing subscriber setup. Log lines go to stderr; stdout carries command
//! results only.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::ui::output::Verbosity;

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "FB_LOG";

/// Build the filter: `FB_LOG` when set and valid, else the verbosity default.
pub fn filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
