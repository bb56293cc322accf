//! Structured logging using the tracing crate
//!
//! Logs are written to stderr so stdout carries only handler output.
//!
//! ## Environment Variables
//!
//! - `LOG_LEVEL`: ERROR, WARN, INFO, DEBUG, TRACE - defaults to INFO
//! - `LOG_FORMAT`: json, pretty, compact - defaults to json
//! - `LOG_SPANS`: include span open/close events (true/false) - defaults to false
//! - `RUST_LOG`: overrides the level filter entirely
//!
//! ```bash
//! LOG_FORMAT=pretty LOG_LEVEL=DEBUG nyan-handler run --params '{"addNumber":"3"}'
//! ```

use std::env;
use std::io;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one object per line
    Json,
    /// Multi-line, colored
    Pretty,
    /// Single-line, colored
    Compact,
}

impl LogFormat {
    /// Parse log format from string; unknown values fall back to JSON
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

/// Parse a level name; unknown values fall back to INFO
pub fn parse_level(s: &str) -> Level {
    match s.trim().to_uppercase().as_str() {
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "DEBUG" => Level::DEBUG,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Only a case-insensitive "true" enables a flag
pub fn parse_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

fn span_events(include_spans: bool) -> FmtSpan {
    if include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Initialize logging with explicit settings
pub fn init_logging(level: Level, format: LogFormat, include_spans: bool) {
    let filter = match env::var("RUST_LOG") {
        Ok(rust_log) => EnvFilter::new(rust_log),
        Err(_) => EnvFilter::new(level.to_string()),
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_span_events(span_events(include_spans));
            subscriber.with(fmt_layer).init();
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_span_events(span_events(include_spans));
            subscriber.with(fmt_layer).init();
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_writer(io::stderr)
                .with_span_events(span_events(include_spans));
            subscriber.with(fmt_layer).init();
        }
    }
}

/// Initialize logging from environment variables
pub fn init_default_logging() {
    let level = parse_level(&env::var("LOG_LEVEL").unwrap_or_default());
    let format = LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default());
    let include_spans = parse_flag(&env::var("LOG_SPANS").unwrap_or_default());

    init_logging(level, format, include_spans);
}

/// Create a span covering one handler invocation
#[macro_export]
macro_rules! invocation_span {
    ($($field:tt)*) => {
        tracing::info_span!("handler_invocation", $($field)*)
    };
}

pub use invocation_span;
