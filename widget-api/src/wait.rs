//! Bounded polling
//!
//! [`until`] calls an operation repeatedly, sleeping between attempts, until it
//! yields a value or the timeout elapses. It knows nothing about widgets or
//! HTTP; callers decide what a failed poll means.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, trace};

/// Default time budget for a polling call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default pause between polling attempts
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Why polling stopped without a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaitError {
    /// The operation never produced a value within the timeout
    #[error("Timed out after {attempts} attempt(s) in {elapsed:?}")]
    DeadlineExpired { attempts: u32, elapsed: Duration },

    /// A zero interval would poll without ever yielding the thread
    #[error("Polling interval must be greater than zero")]
    InvalidInterval,
}

/// Timeout and interval for one polling call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl WaitOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }
}

/// Poll `operation` until it returns `Some`, or until `timeout` elapses
///
/// The operation always runs at least once, even with a zero timeout. The
/// first `Some` is returned without further calls. Between attempts the caller
/// sleeps for `interval`, shortened so that the last attempt lands on the
/// deadline rather than after it.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use widget_api::wait;
///
/// let mut polls = 0;
/// let value = wait::until(Duration::from_secs(1), Duration::from_millis(1), || {
///     polls += 1;
///     (polls == 3).then_some(polls)
/// });
/// assert_eq!(value, Ok(3));
/// ```
pub fn until<T, F>(timeout: Duration, interval: Duration, mut operation: F) -> Result<T, WaitError>
where
    F: FnMut() -> Option<T>,
{
    if interval.is_zero() {
        return Err(WaitError::InvalidInterval);
    }

    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);
        trace!(attempt = attempts, "polling");

        if let Some(value) = operation() {
            return Ok(value);
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            debug!(attempts, ?elapsed, ?timeout, "polling deadline expired");
            return Err(WaitError::DeadlineExpired { attempts, elapsed });
        }

        thread::sleep(interval.min(timeout - elapsed));
    }
}
