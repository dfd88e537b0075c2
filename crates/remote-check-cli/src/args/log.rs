use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Crates whose events are shown below the `trace` level.
const TARGETS: &[&str] = &["remote_graphql_check", "remote_check"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub(crate) enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors from the checker
    Error,
    /// Warnings and errors from the checker
    Warn,
    /// Info, warning and error messages from the checker
    Info,
    /// Debug, info, warning and error messages from the checker
    Debug,
    /// Everything, dependencies included
    Trace,
}

impl LogLevel {
    pub(crate) fn env_filter(self) -> EnvFilter {
        let level = match self {
            LogLevel::Off => return EnvFilter::new("off"),
            LogLevel::Trace => return EnvFilter::new("trace"),
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };

        let directives = TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .chain(std::iter::once("off".to_owned()))
            .collect::<Vec<_>>()
            .join(",");

        EnvFilter::new(directives)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogStyle {
    /// Standard text
    Text,
    /// JSON objects
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_only_our_crates() {
        let filter = LogLevel::Debug.env_filter().to_string();

        assert!(filter.contains("remote_graphql_check=debug"), "{filter}");
        assert!(filter.contains("remote_check=debug"), "{filter}");
        assert!(!filter.contains("reqwest"), "{filter}");
    }
}
