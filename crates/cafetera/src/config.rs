//! Environment-provided configuration.
//!
//! Two values drive the whole suite: the base URL of the application under
//! test and the default budget for explicit waits. Both are read once at
//! startup; nothing mutates them afterwards. There is deliberately no
//! session-wide implicit wait setting: every wait in this crate carries its
//! own call-scoped timeout.

use crate::result::{CafeteraError, CafeteraResult};

/// Default target when `BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "https://coffee-cart.app";

/// Default explicit-wait budget when `DEFAULT_TIMEOUT_MS` is unset
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the coffee-cart application
    pub base_url: String,
    /// Default budget for explicit waits, in milliseconds
    pub default_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Load configuration from the environment (`BASE_URL`,
    /// `DEFAULT_TIMEOUT_MS`), falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` error when `DEFAULT_TIMEOUT_MS` is set but not a
    /// non-negative integer.
    pub fn from_env() -> CafeteraResult<Self> {
        let base_url =
            std::env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let default_timeout_ms = match std::env::var("DEFAULT_TIMEOUT_MS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| CafeteraError::Config {
                message: format!("DEFAULT_TIMEOUT_MS must be an integer, got {raw:?}"),
            })?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            default_timeout_ms,
        })
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the default wait budget
    #[must_use]
    pub const fn with_default_timeout(mut self, ms: u64) -> Self {
        self.default_timeout_ms = ms;
        self
    }

    /// URL of the cart route
    #[must_use]
    pub fn cart_url(&self) -> String {
        format!("{}/cart", self.base_url.trim_end_matches('/'))
    }

    /// URL of the GitHub info route
    #[must_use]
    pub fn github_url(&self) -> String {
        format!("{}/github", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_timeout_ms, 5000);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_base_url("http://localhost:1234")
            .with_default_timeout(250);
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.default_timeout_ms, 250);
    }

    #[test]
    fn test_route_urls_strip_trailing_slash() {
        let config = Config::default().with_base_url("http://localhost:1234/");
        assert_eq!(config.cart_url(), "http://localhost:1234/cart");
        assert_eq!(config.github_url(), "http://localhost:1234/github");
    }
}
