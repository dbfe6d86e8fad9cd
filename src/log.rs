/// Diagnostic logging setup
///
/// User-facing progress is printed directly; tracing output goes to stderr and
/// is quiet unless asked for.
use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "MONOBUILD_LOG";

/// Initialize the global subscriber once.
///
/// Precedence: `-v`/`-q`, then `MONOBUILD_LOG`, then `warn`. `RUST_LOG`
/// replaces all of it when set.
pub fn init(verbose: bool, quiet: bool) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            env::var(LOG_ENV)
                .ok()
                .and_then(|value| parse_level(&value))
                .unwrap_or(Level::WARN)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("monobuild={}", level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => {
            eprintln!(
                "Invalid {} '{}', defaulting to warn. Valid levels: trace, debug, info, warn, error",
                LOG_ENV, value
            );
            None
        }
    }
}
