//! HTTP client shared by the provider adapters

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::domain::DomainError;

/// Retry policy for transient upstream failures.
///
/// Retries apply to transport errors and to the listed status codes;
/// any other non-success status fails immediately. Delay doubles per
/// attempt from `backoff_factor` seconds, plus a little jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: f64,
    pub retry_statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: 0.0,
            retry_statuses: Vec::new(),
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let base = self.backoff_factor * f64::powi(2.0, attempt as i32) * 1000.0;
        let jitter = rand::thread_rng().gen_range(0..100);
        Duration::from_millis(base as u64 + jitter)
    }

    fn retries_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_factor: 1.5,
            retry_statuses: vec![502, 503, 504],
        }
    }
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            retry: RetryPolicy::none(),
        }
    }

    /// Client with separate connect and overall request timeouts, for
    /// backends where generation runs far longer than connection setup.
    pub fn with_timeouts(connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn execute<F>(&self, build: F) -> Result<serde_json::Value, DomainError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let outcome = match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.json().await.map_err(|e| {
                            DomainError::provider(
                                "http",
                                format!("Failed to parse response: {}", e),
                            )
                        });
                    }

                    let retryable = self.retry.retries_status(status.as_u16());
                    let body = response.text().await.unwrap_or_default();
                    (
                        retryable,
                        DomainError::provider("http", format!("HTTP {}: {}", status, body)),
                    )
                }
                Err(e) => (
                    true,
                    DomainError::provider("http", format!("Request failed: {}", e)),
                ),
            };

            let (retryable, error) = outcome;
            if !retryable || attempt >= self.retry.max_retries {
                return Err(error);
            }

            let delay = self.retry.delay(attempt);
            tracing::warn!(
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying HTTP request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        self.execute(|| {
            let mut request = self.client.post(url);
            for (key, value) in &headers {
                request = request.header(*key, *value);
            }
            request.json(body)
        })
        .await
    }

    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        self.execute(|| {
            let mut request = self.client.get(url);
            for (key, value) in &headers {
                request = request.header(*key, *value);
            }
            request.query(&query)
        })
        .await
    }
}
