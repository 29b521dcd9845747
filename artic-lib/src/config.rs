//! Browser configuration

use std::time::Duration;

use crate::retry::RetryConfig;

/// Public API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1";

/// Rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the client and the browser controller.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artic_lib::config::BrowserConfig;
///
/// let config = BrowserConfig::default()
///     .with_page_size(24)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.page_size, 24);
/// ```
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// API base URL, without the `/artworks` suffix.
    ///
    /// Default: `https://api.artic.edu/api/v1`
    pub base_url: String,

    /// Number of rows requested per page.
    ///
    /// Default: 12
    pub page_size: u32,

    /// Per-request timeout.
    ///
    /// Default: 10 seconds
    pub timeout: Duration,

    /// Retry behavior for transient failures.
    pub retry: RetryConfig,

    /// Whether to request only the consumed fields.
    ///
    /// Default: true
    pub restrict_fields: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            restrict_fields: true,
        }
    }
}

impl BrowserConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the page size. Zero is clamped to one.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enables or disables the `fields` restriction.
    pub fn with_restrict_fields(mut self, enabled: bool) -> Self {
        self.restrict_fields = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.base_url, "https://api.artic.edu/api/v1");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.restrict_fields);
    }

    #[test]
    fn test_zero_page_size_clamped() {
        assert_eq!(BrowserConfig::new().with_page_size(0).page_size, 1);
    }
}
