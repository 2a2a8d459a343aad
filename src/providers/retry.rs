/*!
 * Bounded retry with backoff for provider requests.
 *
 * The policy distinguishes three classes of failure:
 * - rate limiting (HTTP 429): wait `base * attempt` seconds, then retry
 * - fatal errors (HTTP 401): surfaced immediately, never retried
 * - everything else (transport errors, non-2xx): short fixed pause, retry
 *
 * Exhausting the attempt budget re-raises the last error to the caller.
 */

use log::warn;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::errors::ProviderError;

/// Retry policy for provider requests
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,

    /// Base backoff in seconds after a rate-limit response; multiplied by
    /// the attempt number for a linearly increasing wait
    pub rate_limit_backoff_secs: u64,

    /// Fixed pause in seconds before retrying any other transient error
    pub transient_backoff_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff_secs: 5,
            transient_backoff_secs: 2,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt ceiling and rate-limit backoff
    pub fn new(max_attempts: u32, rate_limit_backoff_secs: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            rate_limit_backoff_secs,
            ..Self::default()
        }
    }
}

/// Run an operation under the retry policy.
///
/// The operation is re-invoked from scratch on each attempt, so any session
/// state it builds is reconstructed rather than mutated in place.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let is_last = attempt == policy.max_attempts;
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    what, attempt, policy.max_attempts, e
                );

                if !is_last {
                    let backoff_secs = if e.is_rate_limit() {
                        policy.rate_limit_backoff_secs * attempt as u64
                    } else {
                        policy.transient_backoff_secs
                    };
                    sleep(Duration::from_secs(backoff_secs)).await;
                }

                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| ProviderError::RequestFailed(format!("{} never attempted", what))))
}
