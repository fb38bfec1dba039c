//! Resilience features for API calls
//!
//! Provides retry policies with exponential backoff.

pub mod retry;

pub use retry::{RetryConfig, RetryPolicy, RetryableError};
