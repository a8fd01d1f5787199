//! Logging initialization.
//!
//! Logs go to stderr so the terminal screen on stdout stays readable.
//! `VALENTINE_LOG` overrides the filter (default `info`);
//! `VALENTINE_LOG_FORMAT=json` switches to newline-delimited JSON.

use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything other than `json` is human.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Human
        }
    }

    /// Reads `VALENTINE_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var("VALENTINE_LOG_FORMAT").map_or(Self::Human, |v| Self::parse(&v))
    }
}

/// Initializes the global tracing subscriber. Safe to call more than once.
pub fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_env("VALENTINE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Human => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogFormat::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .try_init();
        }
    }
}
