//! Bounded retry loop
//!
//! `retry` runs a fallible async action until it succeeds or the attempt
//! bound is reached. Every failure is retried the same way; there is no
//! backoff, only an optional fixed pause between attempts.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Outcome of a bounded retry loop
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    /// The action succeeded
    Success(T),

    /// Every attempt failed
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error returned by the final attempt (`None` when no attempt was made)
        last_error: Option<E>,
    },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn is_success(&self) -> bool {
        matches!(self, RetryOutcome::Success(_))
    }
}

/// Runs `op` at most `max_attempts` times
///
/// `op` receives the 1-based attempt number. `max_attempts` counts total
/// attempts, so a bound of 3 performs exactly 3 calls when every call fails,
/// and a bound of 0 performs none.
///
/// # Example
///
/// ```
/// use marquee::crawler::{retry, RetryOutcome};
/// use std::time::Duration;
///
/// # tokio_test_block(async {
/// let outcome = retry(3, Duration::ZERO, |attempt| async move {
///     if attempt < 2 { Err("not yet") } else { Ok(attempt) }
/// })
/// .await;
/// assert!(matches!(outcome, RetryOutcome::Success(2)));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
pub async fn retry<T, E, F, Fut>(max_attempts: u32, delay: Duration, mut op: F) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match op(attempt).await {
            Ok(value) => return RetryOutcome::Success(value),
            Err(e) => {
                tracing::debug!(attempt, max_attempts, error = %e, "Attempt failed");
                last_error = Some(e);
            }
        }

        if attempt < max_attempts && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    RetryOutcome::Exhausted {
        attempts: max_attempts,
        last_error,
    }
}
