/*!
 * Waitable Condition Library
 * Cooperative one-shot wait/timeout/cancel primitive for tokio callers
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{ConditionError, ConditionResult, Severity};
pub use crate::core::sync::{
    ConditionConfig, ConditionStats, DiagnosticSink, NullSink, PollBudget, WaitOutcome,
    WaitableCondition,
};
pub use monitoring::{init_tracing, TracingSink};
