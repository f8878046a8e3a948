//! Diagnostic logging setup.
//!
//! Core operations emit `tracing` events; the CLI installs a stderr
//! subscriber so stdout stays reserved for command output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::LOG_ENV;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber.
///
/// Precedence: `NOTEKEEPER_LOG`, then the config `[log] level`, then `warn`
/// (`error` in quiet mode).
pub fn init(config_level: Option<&str>, quiet: bool) {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), config_level, quiet);
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // A subscriber may already be installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn filter_directive(env: Option<String>, config_level: Option<&str>, quiet: bool) -> String {
    if let Some(value) = env.filter(|v| !v.trim().is_empty()) {
        return value;
    }
    if let Some(level) = config_level.filter(|v| !v.trim().is_empty()) {
        return level.to_string();
    }
    if quiet {
        "error".to_string()
    } else {
        DEFAULT_DIRECTIVE.to_string()
    }
}
