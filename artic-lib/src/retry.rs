//! Retry configuration for transient request failures.

use std::time::Duration;

/// Configuration for automatic retry behavior.
///
/// Controls how the client handles transient failures such as rate limiting (429),
/// server errors (5xx), and network errors including timeouts.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use artic_lib::retry::RetryConfig;
///
/// let custom = RetryConfig::default()
///     .max_retries(4)
///     .initial_delay(Duration::from_millis(250))
///     .max_delay(Duration::from_secs(10));
///
/// let no_retry = RetryConfig::no_retry();
/// assert_eq!(no_retry.max_retries, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial delay between retries (doubles each attempt).
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Whether to retry on HTTP 429 (rate limited).
    pub retry_on_429: bool,
    /// Whether to retry on HTTP 5xx (server errors).
    pub retry_on_5xx: bool,
    /// Whether to retry on network errors and timeouts.
    pub retry_on_network: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            retry_on_429: true,
            retry_on_5xx: true,
            retry_on_network: true,
        }
    }
}

impl RetryConfig {
    /// Creates a config with all retries disabled.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_on_429: false,
            retry_on_5xx: false,
            retry_on_network: false,
            ..Default::default()
        }
    }

    /// Sets the maximum number of retries.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Sets the initial delay between retries.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables retry on HTTP 429.
    pub fn retry_on_429(mut self, enabled: bool) -> Self {
        self.retry_on_429 = enabled;
        self
    }

    /// Enables or disables retry on HTTP 5xx.
    pub fn retry_on_5xx(mut self, enabled: bool) -> Self {
        self.retry_on_5xx = enabled;
        self
    }

    /// Enables or disables retry on network errors.
    pub fn retry_on_network(mut self, enabled: bool) -> Self {
        self.retry_on_network = enabled;
        self
    }

    /// Returns the delay to use after `delay`, doubling up to `max_delay`.
    pub(crate) fn next_delay(&self, delay: Duration) -> Duration {
        (delay * 2).min(self.max_delay)
    }
}
