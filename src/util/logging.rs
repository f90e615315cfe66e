//! Structured logging setup for infradiag
//!
//! Logs go to stderr so that the architecture document on stdout stays
//! machine-readable. Filtering follows `RUST_LOG` when it is set, and the
//! crate's own level comes from `INFRADIAG_LOG_LEVEL` or the CLI flags.
//!
//! # Example
//!
//! ```no_run
//! use infradiag::util::{init_logging, LoggingConfig};
//! use tracing::{debug, info};
//!
//! init_logging(LoggingConfig::from_env());
//!
//! info!("Scanner started");
//! debug!(root = "/srv/repo", "Walking repository");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for infradiag's own events
    pub level: Level,

    /// Emit one JSON object per event instead of human-readable lines
    pub use_json: bool,

    /// Include the module target (e.g., infradiag::scanner) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// Level from `INFRADIAG_LOG_LEVEL` (default info), JSON from `INFRADIAG_LOG_JSON`
    pub fn from_env() -> Self {
        let level_str = env::var("INFRADIAG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            level: parse_level(&level_str),
            use_json: json_from_env(),
            ..Default::default()
        }
    }

    /// JSON lines with source locations, for log collectors
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Default::default()
        }
    }
}

/// Parses a log level, case-insensitively, falling back to `Level::INFO`
///
/// ```
/// use infradiag::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Directives applied on top of an unset `RUST_LOG`; a set `RUST_LOG` is used as-is
fn default_directives(level: Level, rust_log_set: bool) -> Vec<String> {
    if rust_log_set {
        return Vec::new();
    }
    // Walker internals are chatty at debug level
    vec![
        format!("infradiag={}", level),
        "ignore=warn".to_string(),
        "globset=warn".to_string(),
    ]
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in default_directives(config.level, env::var("RUST_LOG").is_ok()) {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

/// Whether `INFRADIAG_LOG_JSON` asks for JSON output
fn json_from_env() -> bool {
    env::var("INFRADIAG_LOG_JSON")
        .ok()
        .and_then(|v| v.to_lowercase().parse::<bool>().ok())
        .unwrap_or(false)
}
