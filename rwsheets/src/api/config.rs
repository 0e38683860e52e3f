//! HTTP client configuration with builder pattern
//!
//! Provides a unified configuration for the Sheets transport: endpoint, timeouts
//! and retry policy, with sane defaults.

use std::time::Duration;

/// Public Sheets API endpoint
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// Configuration for the Sheets HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without trailing slash, `/v4/spreadsheets` is appended
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryConfig,
}

/// Retry policy for throttled (429) and server-side (5xx) failures
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("rwsheets/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(16),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Never retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1.0,
        }
    }

    /// More attempts and longer waits, for bulk updates against busy sheets
    pub fn patient() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(64),
            backoff_multiplier: 2.0,
        }
    }

    /// Delay to wait before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        let millis = self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let delay = Duration::from_millis(millis.min(u64::MAX as f64) as u64);
        delay.min(self.max_delay)
    }
}

impl ClientConfig {
    /// Create a new builder for ClientConfig
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Endpoint for the spreadsheets collection
    pub fn spreadsheets_url(&self) -> String {
        format!("{}/v4/spreadsheets", self.base_url.trim_end_matches('/'))
    }
}

/// Builder for ClientConfig
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn max_retries(mut self, max_attempts: u32) -> Self {
        self.config.retry.max_attempts = max_attempts.max(1);
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.user_agent.starts_with("rwsheets/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::builder()
            .base_url("http://localhost:8080/")
            .timeout(Duration::from_secs(5))
            .max_retries(0)
            .build();

        assert_eq!(config.spreadsheets_url(), "http://localhost:8080/v4/spreadsheets");
        assert_eq!(config.timeout, Duration::from_secs(5));
        // At least one attempt is always made
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_backoff_delays() {
        let retry = RetryConfig::default();

        assert_eq!(retry.delay_for(1), Duration::from_millis(500));
        assert_eq!(retry.delay_for(2), Duration::from_millis(1000));
        assert_eq!(retry.delay_for(3), Duration::from_millis(2000));
        assert_eq!(retry.delay_for(20), Duration::from_secs(16));
    }

    #[test]
    fn test_no_retry_config() {
        let retry = RetryConfig::none();
        assert_eq!(retry.max_attempts, 1);
        assert_eq!(retry.delay_for(1), Duration::ZERO);
    }
}
