/*!
 * Synchronization Primitives
 *
 * Cooperative (async) wait primitives built on tokio timers and
 * cancellation tokens. Waits suspend the calling task, never a thread.
 */

pub mod condition;

pub use condition::{
    ConditionConfig, ConditionStats, DiagnosticSink, NullSink, PollBudget, WaitOutcome,
    WaitableCondition,
};
