use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::warn;

/// Verbosity of the extension's own logs. Anything unreadable in the
/// configuration falls back to `Warn` rather than failing startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawLogLevel")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("unknown log level '{0}', expected one of error, warn, info, debug, trace")]
pub struct UnknownLogLevel(String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim() {
            l if l.eq_ignore_ascii_case("error") => LogLevel::Error,
            l if l.eq_ignore_ascii_case("warn") => LogLevel::Warn,
            l if l.eq_ignore_ascii_case("info") => LogLevel::Info,
            l if l.eq_ignore_ascii_case("debug") => LogLevel::Debug,
            l if l.eq_ignore_ascii_case("trace") => LogLevel::Trace,
            _ => return Err(UnknownLogLevel(s.to_string())),
        };
        Ok(level)
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

// YAML and env sources can hand over numbers or booleans, not only names.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLogLevel {
    Name(String),
    Other(Value),
}

impl From<RawLogLevel> for LogLevel {
    fn from(raw: RawLogLevel) -> Self {
        match raw {
            RawLogLevel::Name(name) => name.parse().unwrap_or_else(|e| {
                warn!("{e}, using warn");
                LogLevel::Warn
            }),
            RawLogLevel::Other(value) => {
                warn!("Log level must be a string, got {value}, using warn");
                LogLevel::Warn
            }
        }
    }
}
