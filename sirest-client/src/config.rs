//! Client configuration

use std::time::Duration;

/// Default backend URL
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default poll interval (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Backend connection settings
///
/// # Environment
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SIREST_API_URL | http://localhost:3000 | Backend base URL (requests go to `<url>/api/...`) |
/// | SIREST_ANON_TOKEN | (none) | Public bearer token used before login |
/// | SIREST_POLL_INTERVAL_MS | 3000 | Poller tick |
/// | SIREST_REQUEST_TIMEOUT_MS | (none) | Per-request timeout; unset means no timeout |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without the `/api` suffix
    pub base_url: String,
    /// Public anonymous token sent when no session exists
    pub anon_token: Option<String>,
    pub poll_interval: Duration,
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_token: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: None,
        }
    }

    /// Load from environment variables (a `.env` file is read first if present).
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        let mut config =
            Self::new(std::env::var("SIREST_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()));
        config.anon_token = std::env::var("SIREST_ANON_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        config.poll_interval = Duration::from_millis(
            std::env::var("SIREST_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        );
        config.request_timeout = std::env::var("SIREST_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis);
        config
    }

    pub fn with_anon_token(mut self, token: impl Into<String>) -> Self {
        self.anon_token = Some(token.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// `<base_url>/api/<endpoint>`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let config = ClientConfig::new("http://pos.local:3000/");
        assert_eq!(config.endpoint_url("orders"), "http://pos.local:3000/api/orders");
        assert_eq!(config.endpoint_url("/orders/o1"), "http://pos.local:3000/api/orders/o1");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(3000));
        assert!(config.request_timeout.is_none());
        assert!(config.anon_token.is_none());
    }
}
