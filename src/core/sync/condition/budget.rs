/*!
 * Poll Budget
 *
 * Elapsed time for polling waits is counted in delay units, not wall
 * clock: each slept interval adds exactly one delay to the total.
 */

use std::time::Duration;

/// Smallest interval a polling wait will sleep between checks
pub const MIN_POLL_DELAY: Duration = Duration::from_millis(1);

/// Accumulated delay against a polling deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    delay: Duration,
    timeout: Duration,
    elapsed: Duration,
}

impl PollBudget {
    /// A zero delay is raised to `MIN_POLL_DELAY` so the budget always advances
    pub fn new(delay: Duration, timeout: Duration) -> Self {
        Self {
            delay: delay.max(MIN_POLL_DELAY),
            timeout,
            elapsed: Duration::ZERO,
        }
    }

    /// Interval to sleep before the next check
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Charge one slept interval; returns `true` once the deadline is reached
    #[inline]
    pub fn charge(&mut self) -> bool {
        self.elapsed = self.elapsed.saturating_add(self.delay);
        self.is_exhausted()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.elapsed >= self.timeout
    }
}
