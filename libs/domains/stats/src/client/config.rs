use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

/// Where the stats server lives and how this service identifies itself to it.
#[derive(Clone, Debug)]
pub struct StatsClientConfig {
    pub base_url: String,
    /// Upper bound for one stats call
    pub timeout: Duration,
    /// Reported as `app` on every hit
    pub app_name: String,
}

impl StatsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for StatsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9090".to_string(),
            timeout: Duration::from_millis(2000),
            app_name: "ewm-main-service".to_string(),
        }
    }
}

impl FromEnv for StatsClientConfig {
    /// - STATS_SERVER_URL: defaults to http://localhost:9090
    /// - STATS_TIMEOUT_MS: defaults to 2000
    /// - APP_NAME: defaults to ewm-main-service
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_ms: u64 = env_parse("STATS_TIMEOUT_MS", "2000")?;

        Ok(Self {
            base_url: env_or_default("STATS_SERVER_URL", "http://localhost:9090"),
            timeout: Duration::from_millis(timeout_ms),
            app_name: env_or_default("APP_NAME", "ewm-main-service"),
        })
    }
}
