//! Client configuration options.

use std::time::Duration;

use crate::constants::{API_BASE_URL, API_VERSION, DEFAULT_TIMEOUT, LOGIN_URL};

/// Configuration for [`SasOnline`](crate::client::SasOnline).
///
/// # Example
///
/// ```
/// use sasonline_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(15))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for REST requests.
    pub base_url: String,
    /// Browser login page used by `login_url()`.
    pub login_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the API version header and `v` login parameter.
    pub api_version: String,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            login_url: LOGIN_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            api_version: API_VERSION.to_owned(),
            user_agent: format!("sasonline-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point REST requests at a different host (sandbox, mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the browser login page.
    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin a different API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, API_BASE_URL);
        assert_eq!(config.login_url, LOGIN_URL);
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.api_version, "3");
        assert!(config.user_agent.starts_with("sasonline-rs/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_login_url("http://localhost:8080/connect/login")
            .with_timeout(Duration::from_millis(250))
            .with_api_version("4")
            .with_user_agent("tests");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.login_url, "http://localhost:8080/connect/login");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.api_version, "4");
        assert_eq!(config.user_agent, "tests");
    }
}
