//! Logging setup
//!
//! `RUST_LOG` takes precedence over the level chosen on the command line.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// `--verbose` wins over `--log-level`
    pub fn resolve(verbose: bool, log_level: &str) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::from_str(log_level).unwrap_or(LogLevel::Warn)
        }
    }
}

/// Filter directive for this crate at `level`
pub fn filter_directive(level: LogLevel) -> String {
    format!("transprobe={}", level.to_tracing_level())
}

/// Initialize the global subscriber (stderr, compact)
pub fn init_logger(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("unknown"), None);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(LogLevel::resolve(true, "error"), LogLevel::Debug);
        assert_eq!(LogLevel::resolve(false, "info"), LogLevel::Info);
        assert_eq!(LogLevel::resolve(false, "loud"), LogLevel::Warn);
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(LogLevel::Debug), "transprobe=DEBUG");
    }
}
