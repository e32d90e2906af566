//! Rate-limited HTTP transport.

use async_trait::async_trait;
use disclosure_core::{DisclosureError, Result, Transport};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default minimum spacing between outbound requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Rate limiter to stay under the upstream request quota
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// HTTP transport backed by `reqwest`.
///
/// Every request is bounded by the client timeout, and requests are spaced by at least
/// the configured interval. Failures never expose `reqwest` types: timeouts, connection
/// errors and non-2xx statuses all become [`DisclosureError::Transport`].
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    rate_limiter: Mutex<RateLimiter>,
}

impl HttpTransport {
    /// Create a transport with the default timeout and rate limit.
    pub fn new() -> Result<Self> {
        Self::with_settings(DEFAULT_TIMEOUT, DEFAULT_RATE_LIMIT)
    }

    /// Create a transport with a custom timeout and minimum request interval.
    ///
    /// # Example
    /// ```
    /// use disclosure_dart::HttpTransport;
    /// use std::time::Duration;
    ///
    /// let transport = HttpTransport::with_settings(Duration::from_secs(10), Duration::from_millis(200))?;
    /// # Ok::<(), disclosure_core::DisclosureError>(())
    /// ```
    pub fn with_settings(timeout: Duration, min_interval: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DisclosureError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_client(client, min_interval))
    }

    /// Create a transport around a pre-configured client.
    ///
    /// The client should carry its own timeout.
    #[must_use]
    pub fn with_client(client: reqwest::Client, min_interval: Duration) -> Self {
        Self {
            client,
            rate_limiter: Mutex::new(RateLimiter::new(min_interval)),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>> {
        // Rate limit
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "GET");
        // Query strings carry the credential, so errors are reported without the URL.
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| DisclosureError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DisclosureError::Transport(format!(
                "HTTP {status} from {url}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DisclosureError::Transport(e.without_url().to_string()))?;

        Ok(body.to_vec())
    }
}
