//! Main ArticClient

use std::sync::Arc;
use std::time::Duration;

use log::warn;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderValue;

use crate::config::BrowserConfig;
use crate::error::ApiError;
use crate::error::Error;
use crate::retry::RetryConfig;

/// The client for the Art Institute of Chicago public API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks safely.
///
/// # Example
///
/// ```ignore
/// use artic_lib::ArticClient;
///
/// let client = ArticClient::builder()
///     .url("https://api.artic.edu/api/v1")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let page = client.fetch_page(1, 12).await?;
/// ```
#[derive(Clone)]
pub struct ArticClient {
    inner: Arc<ArticClientInner>,
}

struct ArticClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
    retry_config: RetryConfig,
    restrict_fields: bool,
}

impl ArticClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ArticClientBuilder<Missing> {
        ArticClientBuilder::new()
    }

    /// Builds a client from a [`BrowserConfig`].
    pub fn from_config(config: &BrowserConfig) -> Result<Self, Error> {
        ArticClient::builder()
            .url(&config.base_url)
            .timeout(config.timeout)
            .retry_config(config.retry.clone())
            .restrict_fields(config.restrict_fields)
            .build()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Returns `true` if listing requests ask only for the consumed fields.
    pub fn restricts_fields(&self) -> bool {
        self.inner.restrict_fields
    }

    /// Makes a GET request with retry logic.
    ///
    /// Returns the response only for a success status; everything else
    /// becomes an [`ApiError`].
    pub(crate) async fn request(&self, url: &str) -> Result<reqwest::Response, Error> {
        let retry_config = &self.inner.retry_config;
        let mut attempts = 0;
        let mut delay = retry_config.initial_delay;

        loop {
            match self.send_request_inner(url).await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    // Handle 429 Too Many Requests
                    if status.as_u16() == 429
                        && retry_config.retry_on_429
                        && attempts < retry_config.max_retries
                    {
                        let wait = parse_retry_after(&response)
                            .unwrap_or(delay)
                            .min(retry_config.max_delay);
                        warn!("rate limited on {}, retrying in {:?}", url, wait);
                        tokio::time::sleep(wait).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    // Handle 5xx server errors
                    if status.is_server_error()
                        && retry_config.retry_on_5xx
                        && attempts < retry_config.max_retries
                    {
                        warn!("HTTP {} from {}, retrying in {:?}", status.as_u16(), url, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    let status_code = status.as_u16();
                    let body = response.text().await.unwrap_or_default();
                    let message = if body.is_empty() {
                        status.canonical_reason().unwrap_or_default().to_string()
                    } else {
                        body
                    };
                    return Err(Error::Api(ApiError::http(status_code, message)));
                }
                Err(e) => {
                    if e.is_retryable()
                        && retry_config.retry_on_network
                        && attempts < retry_config.max_retries
                    {
                        warn!("{} on {}, retrying in {:?}", e, url, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    return Err(Error::Api(e));
                }
            }
        }
    }

    /// Inner request method without retry logic.
    async fn send_request_inner(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .inner
            .http_client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.inner.timeout))
    }
}

impl std::fmt::Debug for ArticClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticClient")
            .field("base_url", &self.inner.base_url)
            .field("timeout", &self.inner.timeout)
            .field("retry_config", &self.inner.retry_config)
            .field("restrict_fields", &self.inner.restrict_fields)
            .finish()
    }
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ArticClient`].
///
/// Uses the typestate pattern so the base URL must be set before `build`
/// is available.
///
/// # Example
///
/// ```ignore
/// let client = ArticClient::builder()
///     .url("https://api.artic.edu/api/v1")
///     .timeout(Duration::from_secs(10))
///     .retry_config(RetryConfig::no_retry())
///     .build()?;
/// ```
pub struct ArticClientBuilder<Url> {
    url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_config: RetryConfig,
    restrict_fields: bool,
    http_client: Option<Client>,
}

impl ArticClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            retry_config: RetryConfig::default(),
            restrict_fields: true,
            http_client: None,
        }
    }

    /// Sets the API base URL, e.g. `https://api.artic.edu/api/v1`.
    pub fn url(self, url: impl Into<String>) -> ArticClientBuilder<Set<String>> {
        ArticClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry_config: self.retry_config,
            restrict_fields: self.restrict_fields,
            http_client: self.http_client,
        }
    }
}

impl Default for ArticClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ArticClientBuilder<U> {
    /// Sets the request timeout. Expiry is reported as [`ApiError::Timeout`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Restricts listing payloads to the fields the client consumes.
    ///
    /// Defaults to `true`.
    pub fn restrict_fields(mut self, enabled: bool) -> Self {
        self.restrict_fields = enabled;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ArticClientBuilder<Set<String>> {
    /// Builds the [`ArticClient`].
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<ArticClient, Error> {
        let base_url = self.url.0;
        url::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(ArticClient {
            inner: Arc::new(ArticClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
                retry_config: self.retry_config,
                restrict_fields: self.restrict_fields,
            }),
        })
    }
}
