//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use giosa_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub redis_url: Option<String>,
    pub redis_connect_timeout: Duration,
    pub session: SessionConfig,
    pub pubsub_buffer_size: usize,
    /// Interval between SSE keep-alive comments.
    pub live_keepalive: Duration,
    pub seed_demo_data: bool,
}

/// Cookie session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// At least 64 bytes; otherwise a random key is generated per process.
    pub secret: Option<String>,
    pub cookie_secure: bool,
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_or("DB_MAX_CONNECTIONS", config.max_connections);
            config.min_connections = parse_or("DB_MIN_CONNECTIONS", config.min_connections);
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            redis_url: env::var("REDIS_URL").ok().filter(|u| !u.is_empty()),
            redis_connect_timeout: Duration::from_secs(parse_or("REDIS_CONNECT_TIMEOUT_SECS", 5)),
            session: SessionConfig {
                secret: env::var("SESSION_SECRET").ok(),
                cookie_secure: flag("SESSION_COOKIE_SECURE"),
            },
            pubsub_buffer_size: parse_or("PUBSUB_BUFFER_SIZE", 100),
            live_keepalive: Duration::from_secs(parse_or("LIVE_KEEPALIVE_SECS", 15)),
            seed_demo_data: flag("SEED_DEMO_DATA"),
        }
    }
}

impl Default for AppConfig {
    /// In-memory everything; used by tests.
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            redis_url: None,
            redis_connect_timeout: Duration::from_secs(5),
            session: SessionConfig {
                secret: None,
                cookie_secure: false,
            },
            pubsub_buffer_size: 100,
            live_keepalive: Duration::from_secs(15),
            seed_demo_data: false,
        }
    }
}
