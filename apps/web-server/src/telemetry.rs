//! Tracing subscriber setup for the blog server.
//!
//! `RUST_LOG` wins when set. Otherwise the blog crates log at `GIOSA_LOG_LEVEL`
//! (default `debug`) while the ORM and HTTP plumbing stay quieter.

use std::str::FromStr;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events the blog owns.
const BLOG_TARGETS: [&str; 4] = ["web_server", "giosa_core", "giosa_infra", "migration"];

/// Chatty dependencies capped below the blog level.
const QUIET_TARGETS: [(&str, &str); 3] = [
    ("sea_orm", "warn"),
    ("sqlx", "warn"),
    ("actix_server", "info"),
];

const DEFAULT_SERVICE: &str = "giosa-web";

/// Output layout of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, for a developer terminal.
    #[default]
    Pretty,
    /// One line per event.
    Compact,
    /// For log shippers in production.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(LogFormat::Pretty),
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub format: LogFormat,
    /// Level for the blog crates when `RUST_LOG` is unset.
    pub blog_level: String,
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            blog_level: "debug".to_string(),
            service_name: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Reads `LOG_FORMAT`, `GIOSA_LOG_LEVEL` and `SERVICE_NAME`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            // An unrecognised format is reported once the subscriber is up.
            format: lookup("LOG_FORMAT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.format),
            blog_level: lookup("GIOSA_LOG_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.blog_level),
            service_name: lookup("SERVICE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.service_name),
        }
    }

    /// Filter directives used when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        let mut directives = vec!["info".to_string()];
        directives.extend(
            BLOG_TARGETS
                .iter()
                .map(|target| format!("{target}={}", self.blog_level)),
        );
        directives.extend(
            QUIET_TARGETS
                .iter()
                .map(|(target, level)| format!("{target}={level}")),
        );
        directives.join(",")
    }
}

/// Initialize the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    if let Some(Err(e)) = std::env::var("LOG_FORMAT").ok().map(|v| v.parse::<LogFormat>()) {
        tracing::warn!(error = %e, "Falling back to pretty logs");
    }

    tracing::info!(
        service = %config.service_name,
        format = ?config.format,
        "Telemetry initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> TelemetryConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelemetryConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" compact ".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert_eq!("".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let cfg = config(&[("LOG_FORMAT", "xml"), ("SERVICE_NAME", "  ")]);
        assert_eq!(cfg.format, LogFormat::Pretty);
        assert_eq!(cfg.service_name, "giosa-web");
    }

    #[test]
    fn test_blog_level_applies_to_workspace_crates_only() {
        let cfg = config(&[("LOG_FORMAT", "json"), ("GIOSA_LOG_LEVEL", "trace")]);
        assert_eq!(cfg.format, LogFormat::Json);

        let directives = cfg.default_directives();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("web_server=trace"));
        assert!(directives.contains("giosa_infra=trace"));
        assert!(directives.contains("sea_orm=warn"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
