//! Exponential backoff for operations whose errors know whether they are transient.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(10_000);

/// Errors that can tell a retry apart from a lost cause.
pub trait Transient {
    /// `true` when the same request may succeed later.
    fn is_transient(&self) -> bool;
}

/// Backoff schedule: `max_attempts` tries in total, waiting `initial_delay` after the
/// first failure and multiplying the wait by `multiplier` up to `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INITIAL_DELAY, DEFAULT_MULTIPLIER, DEFAULT_MAX_DELAY)
    }
}

impl RetryPolicy {
    /// `max_attempts` below 1 becomes 1, a multiplier below 1 (or NaN) becomes 1 and the
    /// initial delay never exceeds `max_delay`.
    #[must_use]
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        multiplier: f64,
        max_delay: Duration,
    ) -> Self {
        let multiplier = if multiplier >= 1.0 { multiplier } else { 1.0 };

        Self {
            max_attempts: max_attempts.max(1),
            initial_delay: initial_delay.min(max_delay),
            multiplier,
            max_delay,
        }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Wait before the attempt that follows failed attempt `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        (1..attempt.max(1)).fold(self.initial_delay, |delay, _| self.grow(delay))
    }

    /// Every wait of a fully failing sequence, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts).map(|attempt| self.delay_after(attempt))
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn grow(&self, delay: Duration) -> Duration {
        let next = delay.as_nanos() as f64 * self.multiplier;
        if next.is_finite() && next < self.max_delay.as_nanos() as f64 {
            Duration::from_nanos(next as u64)
        } else {
            self.max_delay
        }
    }
}

/// Progress report handed to the retry callback before each wait.
#[derive(Debug)]
pub struct RetryEvent<'a, E> {
    /// 1-based number of the attempt that just failed.
    pub attempt: u32,
    /// Wait before the next attempt.
    pub delay: Duration,
    pub error: &'a E,
}

/// Runs `operation` until it succeeds, fails permanently or exhausts `policy`.
///
/// Permanent errors are returned after a single attempt. Before each wait `on_retry`
/// receives the failed attempt number, the upcoming delay and the error. Dropping the
/// returned future abandons the sequence, including a pending wait.
///
/// # Errors
/// The last error seen.
pub async fn retry_with_backoff<T, E, F, Fut, C>(
    policy: &RetryPolicy,
    mut operation: F,
    mut on_retry: C,
) -> Result<T, E>
where
    E: Transient + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: FnMut(RetryEvent<'_, E>),
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() => {
                debug!(attempt, %error, "Permanent failure, not retrying");
                return Err(error);
            },
            Err(error) if attempt >= policy.max_attempts => {
                debug!(attempt, %error, "Retries exhausted");
                return Err(error);
            },
            Err(error) => {
                let delay = policy.delay_after(attempt);
                debug!(attempt, ?delay, %error, "Attempt failed, retrying");
                on_retry(RetryEvent { attempt, delay, error: &error });
                tokio::time::sleep(delay).await;
                attempt += 1;
            },
        }
    }
}
