//! Configuration for the network data source.

use std::time::Duration;

use crate::error::ConfigError;

pub const BASE_URL_VAR: &str = "NEWS_BASE_URL";
pub const TIMEOUT_VAR: &str = "NEWS_HTTP_TIMEOUT_SECS";
pub const LOG_TRAFFIC_VAR: &str = "NEWS_LOG_TRAFFIC";

/// Settings handed to `HttpDataSource::from_config` and `ReqwestTransport::new`.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Backend root, e.g. "https://news.example.com/api". A trailing slash is ignored.
    pub base_url: String,

    /// Whole-request timeout.
    pub timeout: Duration,

    pub connect_timeout: Duration,

    pub user_agent: String,

    /// Emit a debug event for every request and response.
    pub log_traffic: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("news-core/{}", env!("CARGO_PKG_VERSION")),
            log_traffic: false,
        }
    }
}

impl NetworkConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_traffic_logging(mut self, enabled: bool) -> Self {
        self.log_traffic = enabled;
        self
    }

    /// Defaults overridden by `NEWS_BASE_URL`, `NEWS_HTTP_TIMEOUT_SECS` and
    /// `NEWS_LOG_TRAFFIC`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: TIMEOUT_VAR,
                expected: "a whole number of seconds",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(LOG_TRAFFIC_VAR) {
            config.log_traffic = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        var: LOG_TRAFFIC_VAR,
                        expected: "a boolean",
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = NetworkConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.log_traffic);
        assert!(config.user_agent.starts_with("news-core/"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = NetworkConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://news.example.com/api"),
            (TIMEOUT_VAR, "5"),
            (LOG_TRAFFIC_VAR, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://news.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.log_traffic);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = NetworkConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }

    #[test]
    fn invalid_log_flag_is_rejected() {
        let result = NetworkConfig::from_lookup(lookup(&[(LOG_TRAFFIC_VAR, "maybe")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidVar { var: LOG_TRAFFIC_VAR, .. })
        ));
    }

    #[test]
    fn builder_methods() {
        let config = NetworkConfig::default()
            .with_base_url("http://127.0.0.1:9000/")
            .with_timeout(Duration::from_millis(250))
            .with_traffic_logging(true);
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(config.log_traffic);
    }
}
