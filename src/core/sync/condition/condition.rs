/*!
 * Waitable Condition
 *
 * One-shot wait primitive with two protocols:
 * - **Timed wait**: arm the condition, then race a timer against `complete()`
 * - **Polling wait**: re-check a predicate at a fixed interval until true or out of budget
 *
 * # Cycle lifecycle
 *
 * ```text
 *  idle ──start()──▶ armed ──complete()────▶ idle (Completed)
 *                      │  ──timer expiry───▶ idle (TimedOut)
 *                      │  ──waiter dropped─▶ idle (Abandoned)
 *                      └──start() again────▶ armed (old cycle Superseded)
 * ```
 *
 * Each cycle owns one `CancelHandle`. Whichever transition ends the cycle
 * takes the handle out of the state, records the outcome on it and drops
 * it. The state lock is never held across an await.
 */

use super::budget::PollBudget;
use super::config::ConditionConfig;
use super::handle::CancelHandle;
use super::outcome::WaitOutcome;
use super::stats::{ConditionStats, StatsCounters};
use super::traits::DiagnosticSink;
use crate::core::errors::ConditionError;
use crate::monitoring::TracingSink;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug)]
struct ConditionState {
    running: bool,
    timeout: Duration,
    generation: u64,
    handle: Option<CancelHandle>,
    last_outcome: Option<WaitOutcome>,
}

/// Cooperative wait/timeout/cancel primitive
///
/// Share between the waiting task and the completing task with `Arc`.
/// Only one wait cycle should be in flight at a time; a second `start`
/// supersedes the first.
///
/// # Examples
///
/// ```
/// use waitable_condition::WaitableCondition;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main] async fn main() {
/// let condition = Arc::new(WaitableCondition::new());
/// let completer = condition.clone();
///
/// tokio::spawn(async move {
///     tokio::time::sleep(Duration::from_millis(20)).await;
///     completer.complete();
/// });
///
/// assert!(condition.timed_wait(Duration::from_secs(1)).await);
/// # }
/// ```
pub struct WaitableCondition {
    state: Mutex<ConditionState>,
    config: ConditionConfig,
    sink: Arc<dyn DiagnosticSink>,
    stats: Arc<StatsCounters>,
}

impl WaitableCondition {
    /// Create an idle condition with default configuration
    pub fn new() -> Self {
        Self::with_config(ConditionConfig::default())
    }

    /// Create an idle condition with the given defaults
    pub fn with_config(config: ConditionConfig) -> Self {
        Self {
            state: Mutex::new(ConditionState {
                running: false,
                timeout: config.default_timeout,
                generation: 0,
                handle: None,
                last_outcome: None,
            }),
            config,
            sink: Arc::new(TracingSink),
            stats: Arc::new(StatsCounters::default()),
        }
    }

    /// Route diagnostics to `sink` instead of `tracing`
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Arm a new wait cycle with a fresh cancel handle
    ///
    /// An outstanding handle from a previous cycle is cancelled and
    /// disposed; its waiter settles as [`WaitOutcome::Superseded`].
    pub fn start(&self, timeout: Duration) {
        let (generation, previous) = {
            let mut state = self.state.lock();
            state.generation += 1;
            let generation = state.generation;
            state.timeout = timeout;
            state.running = true;
            state.last_outcome = None;
            let handle = CancelHandle::new(generation, self.stats.clone());
            (generation, state.handle.replace(handle))
        };
        self.stats.record_armed();

        if let Some(previous) = previous {
            let orphaned = previous.generation();
            previous.settle(WaitOutcome::Superseded);
            self.stats.record_superseded();
            self.sink.report(&ConditionError::Superseded { generation: orphaned });
        }

        trace!(generation, timeout_ms = millis(timeout), "condition armed");
    }

    /// Arm using the configured default deadline
    pub fn start_default(&self) {
        self.start(self.config.default_timeout)
    }

    /// Signal that the awaited condition is satisfied
    ///
    /// No-op on a condition with no cycle in flight.
    pub fn complete(&self) {
        let handle = {
            let mut state = self.state.lock();
            state.running = false;
            let handle = state.handle.take();
            if handle.is_some() {
                state.last_outcome = Some(WaitOutcome::Completed);
            }
            handle
        };

        match handle {
            Some(handle) => {
                trace!(generation = handle.generation(), "condition completed");
                self.stats.record_completed();
                handle.settle(WaitOutcome::Completed);
            }
            None => trace!("complete on idle condition"),
        }
    }

    /// Arm with `timeout`, then wait for completion or expiry
    ///
    /// Returns `true` if `complete()` was called before the deadline.
    pub async fn timed_wait(&self, timeout: Duration) -> bool {
        self.timed_wait_outcome(timeout).await.is_completed()
    }

    /// [`timed_wait`](Self::timed_wait) with the configured default deadline
    pub async fn timed_wait_default(&self) -> bool {
        self.timed_wait(self.config.default_timeout).await
    }

    /// Like [`timed_wait`](Self::timed_wait), but reports how the cycle settled
    pub async fn timed_wait_outcome(&self, timeout: Duration) -> WaitOutcome {
        self.start(timeout);
        self.wait_armed().await
    }

    /// Wait on the cycle armed by a previous `start`, without re-arming
    ///
    /// If no cycle is in flight, resolves to the last cycle's outcome, or
    /// `Completed` (with a `NotArmed` diagnostic) if the condition was never armed.
    pub async fn wait_armed(&self) -> WaitOutcome {
        let armed = {
            let state = self.state.lock();
            state
                .handle
                .as_ref()
                .map(|handle| handle.ticket(state.timeout))
                .ok_or(state.last_outcome)
        };
        let ticket = match armed {
            Ok(ticket) => ticket,
            Err(last) => {
                return last.unwrap_or_else(|| {
                    self.sink.report(&ConditionError::NotArmed);
                    WaitOutcome::Completed
                })
            }
        };

        let mut guard = AbandonGuard {
            condition: self,
            generation: ticket.generation,
            armed: true,
        };

        let started = Instant::now();
        tokio::select! {
            _ = ticket.token.cancelled() => {
                if ticket.outcome() == WaitOutcome::Completed {
                    self.sink.report(&ConditionError::CancellationRace {
                        generation: ticket.generation,
                        elapsed_ms: millis(started.elapsed()),
                    });
                }
            }
            _ = tokio::time::sleep(ticket.timeout) => {
                self.settle_current(ticket.generation, WaitOutcome::TimedOut);
            }
        }
        guard.armed = false;

        let outcome = ticket.outcome();
        trace!(generation = ticket.generation, outcome = outcome.as_str(), "wait settled");
        outcome
    }

    /// End the cycle `generation` with `outcome` if it is still the current one
    fn settle_current(&self, generation: u64, outcome: WaitOutcome) {
        let current = {
            let mut state = self.state.lock();
            match state.handle.as_ref() {
                Some(handle) if handle.generation() == generation => {
                    state.running = false;
                    state.last_outcome = Some(outcome);
                    state.handle.take()
                }
                _ => None,
            }
        };

        if let Some(handle) = current {
            match outcome {
                WaitOutcome::TimedOut => self.stats.record_timed_out(),
                WaitOutcome::Abandoned => self.stats.record_abandoned(),
                WaitOutcome::Completed | WaitOutcome::Superseded => {}
            }
            trace!(generation, outcome = outcome.as_str(), "cycle settled by waiter");
            handle.settle(outcome);
        }
    }

    /// Poll `predicate` with the configured delay and deadline
    pub async fn polling_wait<F>(&self, predicate: F) -> bool
    where
        F: FnMut() -> bool,
    {
        self.polling_wait_with(Some(predicate), self.config.poll_delay, self.config.default_timeout)
            .await
    }

    /// Poll `predicate` every `delay` until it returns true or `timeout` worth
    /// of delays has been spent
    ///
    /// The result is always a fresh evaluation taken after the loop exits.
    /// A missing predicate reports [`ConditionError::NullPredicate`] and
    /// returns `false` without waiting. Independent of `start`/`complete`.
    pub async fn polling_wait_with<F>(
        &self,
        predicate: Option<F>,
        delay: Duration,
        timeout: Duration,
    ) -> bool
    where
        F: FnMut() -> bool,
    {
        let Some(mut predicate) = predicate else {
            self.sink.report(&ConditionError::NullPredicate);
            return false;
        };

        let mut budget = PollBudget::new(delay, timeout);
        while !self.evaluate(&mut predicate) {
            tokio::time::sleep(budget.delay()).await;
            if budget.charge() {
                trace!(elapsed_ms = millis(budget.elapsed()), "polling budget exhausted");
                break;
            }
        }

        self.evaluate(&mut predicate)
    }

    #[inline]
    fn evaluate<F: FnMut() -> bool>(&self, predicate: &mut F) -> bool {
        self.stats.record_poll();
        predicate()
    }

    /// Whether a timed wait cycle is in flight
    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Deadline of the current (or most recent) cycle
    pub fn timeout(&self) -> Duration {
        self.state.lock().timeout
    }

    /// Number of cycles armed so far
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Whether a cancel handle is currently held
    pub fn has_handle(&self) -> bool {
        self.state.lock().handle.is_some()
    }

    pub fn config(&self) -> &ConditionConfig {
        &self.config
    }

    pub fn stats(&self) -> ConditionStats {
        self.stats.snapshot()
    }
}

/// Releases the cycle if the waiting future is dropped before it settles
struct AbandonGuard<'a> {
    condition: &'a WaitableCondition,
    generation: u64,
    armed: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.condition.settle_current(self.generation, WaitOutcome::Abandoned);
        }
    }
}

#[inline]
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Default for WaitableCondition {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WaitableCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("WaitableCondition")
            .field("running", &state.running)
            .field("timeout", &state.timeout)
            .field("generation", &state.generation)
            .field("handle", &state.handle)
            .finish()
    }
}
