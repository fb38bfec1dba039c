//! Retry policies with exponential backoff
//!
//! Retries transient failures of telemetry API calls: network errors,
//! timeouts, rate limiting and server errors.

use log::{debug, info, warn};
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Single attempt, no waiting
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(0),
            max_delay: Duration::from_millis(0),
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

/// Types of errors and their retry behavior
#[derive(Debug, Clone, PartialEq)]
pub enum RetryableError {
    /// Network-level errors (connection refused, DNS, etc)
    Network,
    /// HTTP 5xx server errors
    ServerError(u16),
    /// HTTP 429 Too Many Requests
    RateLimited,
    /// HTTP 408 or a client-side timeout
    Timeout,
    /// Non-retryable client errors (4xx except 408, 429)
    ClientError(u16),
    /// Unknown/other errors
    Unknown,
}

impl RetryableError {
    pub fn should_retry(&self) -> bool {
        match self {
            RetryableError::Network => true,
            RetryableError::ServerError(_) => true,
            RetryableError::RateLimited => true,
            RetryableError::Timeout => true,
            RetryableError::ClientError(_) => false,
            RetryableError::Unknown => false,
        }
    }

    /// Classify an HTTP status code into retry behavior
    pub fn from_status_code(status: u16) -> Self {
        match status {
            408 => RetryableError::Timeout,
            429 => RetryableError::RateLimited,
            400..=499 => RetryableError::ClientError(status),
            500..=599 => RetryableError::ServerError(status),
            _ => RetryableError::Unknown,
        }
    }

    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            RetryableError::Timeout
        } else if error.is_connect() || error.is_request() {
            RetryableError::Network
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else {
            RetryableError::Unknown
        }
    }
}

/// Retry policy that implements exponential backoff with jitter
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Send a request, retrying transport failures and retryable statuses.
    ///
    /// The last response is returned as-is once attempts run out, so the
    /// caller still sees the final status code.
    pub async fn execute<F, Fut>(&self, operation: F) -> anyhow::Result<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 1;
        loop {
            debug!("Sending request (attempt {}/{})", attempt, self.config.max_attempts);
            let last_attempt = attempt >= self.config.max_attempts;

            match operation().await {
                Ok(response) => {
                    let class = RetryableError::from_status_code(response.status().as_u16());
                    if response.status().is_success() || !class.should_retry() || last_attempt {
                        if attempt > 1 {
                            info!("Request finished after {} attempts with {}", attempt, response.status());
                        }
                        return Ok(response);
                    }
                    warn!("Request returned {} on attempt {} (retryable)", response.status(), attempt);
                }
                Err(error) => {
                    let should_retry = RetryableError::from_reqwest_error(&error).should_retry();
                    if !should_retry || last_attempt {
                        warn!(
                            "Request failed permanently on attempt {} (should_retry: {}): {}",
                            attempt, should_retry, error
                        );
                        return Err(error.into());
                    }
                    warn!("Request failed on attempt {} (retryable): {}", attempt, error);
                }
            }

            let delay = self.calculate_delay(attempt);
            debug!("Waiting {:?} before retry", delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Exponential backoff delay with optional jitter
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let delay_ms = (self.config.base_delay.as_millis() as f64)
            * self.config.backoff_multiplier.powi(attempt as i32 - 1);

        let mut delay = Duration::from_millis(delay_ms as u64);
        if delay > self.config.max_delay {
            delay = self.config.max_delay;
        }

        if self.config.jitter {
            let jitter_factor = rand::thread_rng().gen_range(0.5..=1.5);
            let jittered_ms = (delay.as_millis() as f64 * jitter_factor) as u64;
            delay = Duration::from_millis(jittered_ms);
        }

        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_error_classification() {
        assert!(RetryableError::Network.should_retry());
        assert!(RetryableError::ServerError(502).should_retry());
        assert!(RetryableError::RateLimited.should_retry());
        assert!(RetryableError::Timeout.should_retry());

        assert!(!RetryableError::ClientError(401).should_retry());
        assert!(!RetryableError::Unknown.should_retry());
    }

    #[test]
    fn test_status_code_classification() {
        assert_eq!(RetryableError::from_status_code(408), RetryableError::Timeout);
        assert_eq!(RetryableError::from_status_code(429), RetryableError::RateLimited);
        assert_eq!(RetryableError::from_status_code(401), RetryableError::ClientError(401));
        assert_eq!(RetryableError::from_status_code(404), RetryableError::ClientError(404));
        assert_eq!(RetryableError::from_status_code(500), RetryableError::ServerError(500));
        assert_eq!(RetryableError::from_status_code(200), RetryableError::Unknown);
    }

    #[test]
    fn test_delay_calculation() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter: false,
        });

        assert_eq!(policy.calculate_delay(1), Duration::from_millis(100));
        assert_eq!(policy.calculate_delay(2), Duration::from_millis(200));
        assert_eq!(policy.calculate_delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: false,
        });

        assert_eq!(policy.calculate_delay(5), Duration::from_secs(5));
        assert_eq!(policy.calculate_delay(10), Duration::from_secs(5));
    }

    #[test]
    fn test_max_attempts_never_zero() {
        let config = RetryConfig::default().with_max_attempts(0);
        assert_eq!(config.max_attempts, 1);
    }

    #[tokio::test]
    async fn test_connection_refused_is_returned_after_attempts() {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            backoff_multiplier: 1.0,
            jitter: false,
        });
        let client = reqwest::Client::new();

        let result = policy
            .execute(|| client.get("http://127.0.0.1:1/").send())
            .await;

        assert!(result.is_err());
    }
}
