//! Logging infrastructure for alarmgrid.
//!
//! Structured logging controlled by the `ALARMGRID_DEBUG` environment variable.
//!
//! # Environment Variables
//!
//! - `ALARMGRID_DEBUG=true` - Enable debug logging
//! - `ALARMGRID_DEBUG=1` - Enable debug logging
//! - `ALARMGRID_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `ALARMGRID_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use alarmgrid_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//!
//! // Or with an explicit level
//! logging::init_with_level("debug");
//! ```
//!
//! Inside the crates, the standard tracing macros are used:
//!
//! ```rust,ignore
//! debug!(predicate = name, active, "Toggled filter predicate");
//! warn!(predicate = name, "Ignoring toggle of unknown filter predicate");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "ALARMGRID_DEBUG";
const LEVEL_VAR: &str = "ALARMGRID_LOG_LEVEL";
const FORMAT_VAR: &str = "ALARMGRID_LOG_FORMAT";

/// Check if debug logging is enabled via `ALARMGRID_DEBUG`.
///
/// Returns `true` if it is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

/// Get the configured log level from `ALARMGRID_LOG_LEVEL`.
///
/// Defaults to "debug" if `ALARMGRID_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    resolve_level(env::var(LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// Get the configured log format from `ALARMGRID_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    resolve_format(env::var(FORMAT_VAR).ok().as_deref())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn resolve_level(requested: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match requested.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn resolve_format(requested: Option<&str>) -> &'static str {
    match requested.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize the alarmgrid logging system.
///
/// Call once at application startup; subsequent calls are no-ops. Nothing is
/// installed unless `ALARMGRID_DEBUG` or `ALARMGRID_LOG_LEVEL` is set.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    install(get_log_level());
}

/// Initialize logging with a specific level, ignoring the environment.
pub fn init_with_level(level: &str) {
    install(resolve_level(Some(level), false));
}

/// Initialize debug-level logging.
pub fn init_debug() {
    install("debug");
}

fn install(level: &'static str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "alarmgrid={},alarmgrid_query={},alarmgrid_schema={}",
                level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "alarmgrid logging initialized"
            );
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            // Without the subscriber feature the host installs its own.
            let _ = level;
        }
    });
}
