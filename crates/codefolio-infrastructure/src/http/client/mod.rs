mod types;

pub use types::RetryConfig;

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;

use types::USER_AGENT;

/// Shared reqwest client with bounded retry for the provider adapters.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry_config: RetryConfig,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_config(RetryConfig::default(), timeout)
    }

    pub fn with_config(retry_config: RetryConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .gzip(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retry_config,
        })
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Execute a request with retry logic
    ///
    /// Retries on:
    /// - Network errors (connection failures, timeouts)
    /// - 5xx server errors
    /// - 429 Too Many Requests
    ///
    /// Everything else is returned on the first failure.
    pub async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut request_fn: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;

            match request_fn().await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!("✅ {} succeeded after {} attempts", operation_name, attempt);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry =
                        attempt <= self.retry_config.max_retries && Self::is_retryable_error(&e);

                    if !should_retry {
                        if attempt > self.retry_config.max_retries {
                            warn!("❌ {} failed after {} attempts", operation_name, attempt);
                        }
                        return Err(e);
                    }

                    warn!(
                        "⚠️  {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                        operation_name, attempt, self.retry_config.max_retries, e, backoff_ms
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = self.retry_config.next_backoff(backoff_ms);
                }
            }
        }
    }

    /// Send the request built by `build`, failing on non-2xx, and decode the JSON body
    pub async fn send_json<B, T>(&self, operation_name: &str, build: B) -> Result<T>
    where
        B: Fn(&Client) -> RequestBuilder,
        T: DeserializeOwned + Send,
    {
        self.execute_with_retry(operation_name, || {
            let request = build(&self.client);
            async move {
                let response = request.send().await?.error_for_status()?;
                Ok(response.json::<T>().await?)
            }
        })
        .await
    }

    fn is_retryable_error(error: &anyhow::Error) -> bool {
        if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_connect() || reqwest_err.is_timeout() || reqwest_err.is_request() {
                return true;
            }

            if let Some(status) = reqwest_err.status() {
                return status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn client() -> HttpClient {
        HttpClient::with_config(RetryConfig::for_providers(), Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_once() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = client()
            .execute_with_retry("decode", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(anyhow::anyhow!("malformed body")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_is_returned() {
        let value = client()
            .execute_with_retry("ok", || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_plain_errors_are_not_retryable() {
        assert!(!HttpClient::is_retryable_error(&anyhow::anyhow!("nope")));
    }
}
