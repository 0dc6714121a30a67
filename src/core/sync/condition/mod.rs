/*!
 * Waitable Condition
 *
 * One-shot wait/timeout/cancel primitive for a single logical caller:
 * - Timed wait: timer raced against explicit completion
 * - Polling wait: fixed-interval predicate re-check under a deadline
 *
 * Diagnostics go through an injectable [`DiagnosticSink`]; the wait
 * methods themselves always settle to a boolean.
 */

mod budget;
mod condition;
mod config;
mod handle;
mod outcome;
mod stats;
mod traits;

pub use budget::{PollBudget, MIN_POLL_DELAY};
pub use condition::WaitableCondition;
pub use config::{ConditionConfig, POLL_DELAY_ENV, TIMEOUT_ENV};
pub use outcome::WaitOutcome;
pub use stats::ConditionStats;
pub use traits::{DiagnosticSink, NullSink};
