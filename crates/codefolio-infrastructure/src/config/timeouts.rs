use std::time::Duration;

/// Timeout durations used across the backend
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Single HTTP request to a third-party API
    pub http_request: Duration,

    /// Whole fetch for one provider, retries included
    pub provider_fetch: Duration,

    /// Acquiring a database connection
    pub db_acquire: Duration,

    /// SMTP delivery
    pub smtp: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        GLOBAL_TIMEOUT_CONFIG.clone()
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the per-provider budget, keeping the single request timeout
    /// no longer than it
    pub fn with_provider_fetch(mut self, provider_fetch: Duration) -> Self {
        self.provider_fetch = provider_fetch;
        self.http_request = self.http_request.min(provider_fetch);
        self
    }

    /// Get the global timeout configuration
    pub fn global() -> &'static Self {
        &GLOBAL_TIMEOUT_CONFIG
    }
}

static GLOBAL_TIMEOUT_CONFIG: TimeoutConfig = TimeoutConfig {
    http_request: Duration::from_secs(8),
    provider_fetch: Duration::from_secs(10),
    db_acquire: Duration::from_secs(10),
    smtp: Duration::from_secs(15),
};
