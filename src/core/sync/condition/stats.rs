/*!
 * Condition Statistics
 * Lock-free counters shared between a condition and its cancel handles
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters, updated with relaxed atomics
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    armed: AtomicU64,
    completed: AtomicU64,
    timed_out: AtomicU64,
    superseded: AtomicU64,
    abandoned: AtomicU64,
    handles_created: AtomicU64,
    handles_disposed: AtomicU64,
    polls: AtomicU64,
}

macro_rules! bump {
    ($($name:ident => $field:ident),+ $(,)?) => {
        $(
            #[inline(always)]
            pub(crate) fn $name(&self) {
                self.$field.fetch_add(1, Ordering::Relaxed);
            }
        )+
    };
}

impl StatsCounters {
    bump! {
        record_armed => armed,
        record_completed => completed,
        record_timed_out => timed_out,
        record_superseded => superseded,
        record_abandoned => abandoned,
        record_handle_created => handles_created,
        record_handle_disposed => handles_disposed,
        record_poll => polls,
    }

    pub(crate) fn snapshot(&self) -> ConditionStats {
        ConditionStats {
            armed: self.armed.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            superseded: self.superseded.load(Ordering::Relaxed),
            abandoned: self.abandoned.load(Ordering::Relaxed),
            handles_created: self.handles_created.load(Ordering::Relaxed),
            handles_disposed: self.handles_disposed.load(Ordering::Relaxed),
            polls: self.polls.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of a condition's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionStats {
    /// Calls to `start` (including those made by `timed_wait`)
    pub armed: u64,
    /// Wait cycles settled as completed
    pub completed: u64,
    /// Wait cycles settled by deadline expiry
    pub timed_out: u64,
    /// Wait cycles orphaned by a later `start`
    pub superseded: u64,
    /// Wait cycles released because the waiting future was dropped
    pub abandoned: u64,
    pub handles_created: u64,
    pub handles_disposed: u64,
    /// Predicate evaluations across all polling waits
    pub polls: u64,
}

impl ConditionStats {
    /// Handles created but not yet disposed (0 or 1 for a well-behaved caller)
    pub fn outstanding_handles(&self) -> u64 {
        self.handles_created.saturating_sub(self.handles_disposed)
    }
}
