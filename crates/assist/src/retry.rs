//! Retry with exponential backoff for transient collaborator failures.
//!
//! Only errors that report [`AssistError::is_retryable`] are retried; anything
//! else returns immediately so the caller can fall back without waiting.

use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::AssistError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first call.
    pub max_retries: u32,
    /// Base delay between retries (doubled per attempt).
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
    /// Add 0-50% random jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }
}

impl RetryConfig {
    /// Sum of the largest possible delays between all attempts.
    pub fn max_total_backoff(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| {
                let delay = capped_delay_ms(self, attempt);
                let jitter = if self.jitter { delay / 2 } else { 0 };
                Duration::from_millis(delay + jitter)
            })
            .sum()
    }
}

/// Outcome of a retried operation.
#[derive(Debug, Clone)]
pub struct RetryOutcome<T> {
    pub result: Result<T, AssistError>,
    /// Number of attempts made (1 = no retries needed).
    pub attempts: u32,
    pub total_duration: Duration,
}

impl<T> RetryOutcome<T> {
    pub fn into_result(self) -> Result<T, AssistError> {
        self.result
    }
}

/// Run `operation` until it succeeds, fails permanently, or retries run out.
pub async fn execute_with_retry<T, F, Fut>(config: &RetryConfig, mut operation: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AssistError>>,
{
    let start = Instant::now();
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryOutcome {
                    result: Ok(value),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(err) if err.is_retryable() && attempt < config.max_retries => {
                let delay = calculate_delay(config, attempt);
                tracing::debug!(attempt, ?delay, error = %err, "retrying collaborator call");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                return RetryOutcome {
                    result: Err(err),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
        }
    }
}

fn capped_delay_ms(config: &RetryConfig, attempt: u32) -> u64 {
    let base = config.base_delay.as_millis() as u64;
    let exponential = base.saturating_mul(2_u64.saturating_pow(attempt));
    exponential.min(config.max_delay.as_millis() as u64)
}

fn calculate_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let delay = capped_delay_ms(config, attempt);

    if config.jitter {
        let jitter = fastrand::u64(0..=delay / 2);
        Duration::from_millis(delay + jitter)
    } else {
        Duration::from_millis(delay)
    }
}
