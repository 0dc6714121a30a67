/*!
 * Wait Outcome
 *
 * Explicit settlement states for a timed wait. Collapsed to a boolean
 * ("did it finish in time") only at the public boundary.
 */

use serde::{Deserialize, Serialize};

/// How a timed wait cycle settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitOutcome {
    /// `complete()` was called before the deadline
    Completed,
    /// The deadline elapsed while the condition was still running
    TimedOut,
    /// A later `start()` re-armed the condition and orphaned this cycle
    Superseded,
    /// The waiting future was dropped before the cycle settled
    Abandoned,
}

impl WaitOutcome {
    /// Whether the awaited condition finished in time
    #[inline(always)]
    pub fn is_completed(&self) -> bool {
        matches!(self, WaitOutcome::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::TimedOut => "timed_out",
            Self::Superseded => "superseded",
            Self::Abandoned => "abandoned",
        }
    }
}

impl From<WaitOutcome> for bool {
    #[inline(always)]
    fn from(outcome: WaitOutcome) -> bool {
        outcome.is_completed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_completed_is_true() {
        assert!(bool::from(WaitOutcome::Completed));
        assert!(!bool::from(WaitOutcome::TimedOut));
        assert!(!bool::from(WaitOutcome::Superseded));
        assert!(!bool::from(WaitOutcome::Abandoned));
    }

    #[test]
    fn test_as_str() {
        assert_eq!(WaitOutcome::TimedOut.as_str(), "timed_out");
    }
}
