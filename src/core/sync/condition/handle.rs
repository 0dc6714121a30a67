/*!
 * Cancel Handle
 *
 * RAII guard around the per-cycle cancellation token. Dropping the guard
 * disposes the handle; the guard lives in exactly one place (the
 * condition's state) so each handle is disposed exactly once.
 */

use super::outcome::WaitOutcome;
use super::stats::StatsCounters;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub(crate) struct CancelHandle {
    token: CancellationToken,
    generation: u64,
    resolution: Arc<OnceLock<WaitOutcome>>,
    stats: Arc<StatsCounters>,
}

/// What a waiter needs to race one cycle, detached from the condition's lock
#[derive(Debug, Clone)]
pub(crate) struct CycleTicket {
    pub(crate) token: CancellationToken,
    pub(crate) generation: u64,
    pub(crate) timeout: Duration,
    resolution: Arc<OnceLock<WaitOutcome>>,
}

impl CycleTicket {
    /// How the cycle settled
    ///
    /// Unresolved only if the handle was dropped without settling, which
    /// happens when the owning condition is torn down mid-wait.
    pub(crate) fn outcome(&self) -> WaitOutcome {
        self.resolution.get().copied().unwrap_or(WaitOutcome::TimedOut)
    }
}

impl CancelHandle {
    pub(crate) fn new(generation: u64, stats: Arc<StatsCounters>) -> Self {
        stats.record_handle_created();
        Self {
            token: CancellationToken::new(),
            generation,
            resolution: Arc::new(OnceLock::new()),
            stats,
        }
    }

    pub(crate) fn ticket(&self, timeout: Duration) -> CycleTicket {
        CycleTicket {
            token: self.token.clone(),
            generation: self.generation,
            timeout,
            resolution: self.resolution.clone(),
        }
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Record the outcome, wake the waiter, then dispose
    ///
    /// The outcome is published before cancellation so a woken waiter always sees it.
    pub(crate) fn settle(self, outcome: WaitOutcome) {
        let _ = self.resolution.set(outcome);
        self.token.cancel();
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.stats.record_handle_disposed();
        tracing::trace!(generation = self.generation, "cancel handle disposed");
    }
}

impl std::fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelHandle")
            .field("generation", &self.generation)
            .field("resolution", &self.resolution.get())
            .finish()
    }
}
