//! Per-frame timeout and retry with capped exponential backoff

use std::future::Future;
use std::time::Duration;

use tracing::{info_span, warn, Instrument};

use crate::error::PerceptionError;
use crate::ports::PerceptionSettings;

/// Timeout and retry budget for one frame acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Deadline for a single attempt
    pub timeout: Duration,
    /// Attempts after the first one
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_settings(settings: &PerceptionSettings) -> Self {
        Self {
            timeout: Duration::from_secs(settings.timeout_secs),
            max_retries: settings.max_retries,
            base_delay_ms: settings.base_delay_ms,
            max_delay_ms: settings.max_delay_ms,
        }
    }

    /// `base * 2^attempt`, or the provider's requested delay, capped at `max_delay_ms`
    pub fn delay_for(&self, attempt: u32, retry_after_ms: Option<u64>) -> Duration {
        let millis = retry_after_ms.unwrap_or_else(|| {
            self.base_delay_ms
                .saturating_mul(2u64.saturating_pow(attempt))
        });
        Duration::from_millis(millis.min(self.max_delay_ms))
    }
}

/// Run `op` under the policy's timeout, retrying transient failures
///
/// Non-retryable errors and the error of the last permitted attempt are returned as-is.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    frame: &str,
    op: F,
) -> Result<T, PerceptionError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, PerceptionError>>,
{
    let mut attempt = 0;
    loop {
        let span = info_span!("perception_attempt", frame = %frame, attempt = attempt + 1);
        let result = match tokio::time::timeout(policy.timeout, op()).instrument(span).await {
            Ok(result) => result,
            Err(_) => Err(PerceptionError::Timeout {
                frame: frame.to_string(),
                after: policy.timeout,
            }),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt, e.retry_after_ms());
                warn!(
                    frame = %frame,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Perception failed, retrying: {}",
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
