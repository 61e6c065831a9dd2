use std::time::Duration;

/// What to do after a failed project-list load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait for the given delay, then try again without telling the user
    RetryAfter(Duration),
    /// Retry budget exhausted on a transient failure: keep the collection empty, stay silent
    GiveUpSilently,
    /// Surface the failure to the user now
    Surface,
}

/// LoadRetryPolicy for the initial project-list load.
///
/// Only connection-level failures are retried, with a fixed delay between
/// attempts. `max_attempts` counts every attempt, including the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl LoadRetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Decides the follow-up of a failed attempt
    ///
    /// # Arguments
    /// * `attempt` - 1-based number of the attempt that just failed
    /// * `transient` - Whether the failure was a connection-level failure
    pub fn decide(&self, attempt: u32, transient: bool) -> RetryDecision {
        if !transient {
            return RetryDecision::Surface;
        }
        if attempt < self.max_attempts {
            RetryDecision::RetryAfter(self.delay)
        } else {
            RetryDecision::GiveUpSilently
        }
    }
}

impl Default for LoadRetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}
