// Retry logic with Retry-After header support
// Author: kelexine (https://github.com/kelexine)

use crate::config::RetrySettings;
use backoff::{backoff::Backoff, ExponentialBackoff};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest `Retry-After` we wait out. A longer hint ends the retry loop
/// instead of retrying before the server is ready.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// How many times to try, and how long to wait between tries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
        }
    }
}

impl RetryPolicy {
    /// Create exponential backoff configuration for one request
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_backoff,
            initial_interval: self.initial_backoff,
            randomization_factor: 0.3, // Add jitter
            multiplier: 2.0,
            max_interval: self.max_backoff,
            // Attempt count bounds the loop, not elapsed time
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Delay before the next attempt.
    ///
    /// A server-provided `Retry-After` is a floor: we never come back sooner
    /// than asked, but may wait longer if our own backoff has grown past it.
    pub fn delay_for(&self, retry_after: Option<Duration>, backoff_delay: Duration) -> Duration {
        match retry_after {
            Some(hint) => hint.max(backoff_delay),
            None => backoff_delay,
        }
    }
}

/// Parse a `Retry-After` header value.
///
/// Accepts delta-seconds (`"2"`) or an HTTP-date
/// (`"Wed, 21 Oct 2015 07:28:00 GMT"`). Dates in the past yield zero.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Determine if an HTTP status code is retryable
pub fn is_retryable(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// A single failed attempt.
#[derive(Debug, Clone)]
pub struct AttemptError {
    /// HTTP status, or `None` for transport failures (connect, timeout).
    pub status: Option<u16>,
    /// Parsed `Retry-After` header, if the response carried one.
    pub retry_after: Option<Duration>,
    pub message: String,
}

impl AttemptError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            retry_after: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, retry_after: Option<Duration>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            retry_after,
            message: message.into(),
        }
    }

    fn is_retryable(&self) -> bool {
        self.status.map_or(true, is_retryable)
    }
}

/// Why `with_retry` gave up.
#[derive(Debug, Clone)]
pub enum RetryError {
    /// Every attempt failed with a retryable error.
    Exhausted { attempts: u32, last: AttemptError },
    /// An attempt failed in a way retrying cannot fix (e.g. 404).
    Fatal(AttemptError),
}

/// Execute operation with retry logic
/// - Honors `Retry-After` if the failed attempt carried one
/// - Falls back to exponential backoff
/// - Makes at most `policy.max_attempts` calls
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, AttemptError>>,
{
    let mut backoff = policy.backoff();
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(error) => {
                if !error.is_retryable() {
                    return Err(RetryError::Fatal(error));
                }
                let too_long = error.retry_after.is_some_and(|hint| hint > MAX_RETRY_AFTER);
                if attempt >= policy.max_attempts || too_long {
                    warn!(
                        "{} giving up after {} attempts (retry after {:?}): {}",
                        operation_name, attempt, error.retry_after, error.message
                    );
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: error,
                    });
                }

                let backoff_delay = backoff.next_backoff().unwrap_or(policy.max_backoff);
                let delay = policy.delay_for(error.retry_after, backoff_delay);
                debug!(
                    "{} failed with {:?} (attempt {}), retrying after {}ms",
                    operation_name,
                    error.status,
                    attempt,
                    delay.as_millis()
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}
