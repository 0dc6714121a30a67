/*!
 * Error Types
 * Condition diagnostics with thiserror, miette, and serde support
 *
 * None of these are returned from the wait protocols themselves. Waits
 * always settle to a boolean; the variants below travel through a
 * `DiagnosticSink` instead. Only configuration loading returns them as `Err`.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for condition configuration
pub type ConditionResult<T> = Result<T, ConditionError>;

/// How loudly a diagnostic should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Condition-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConditionError {
    #[error("Polling wait invoked without a predicate")]
    #[diagnostic(
        code(condition::null_predicate),
        help("Pass Some(predicate); a missing predicate resolves to false immediately.")
    )]
    NullPredicate,

    #[error("Timed wait for generation {generation} interrupted by completion after {elapsed_ms}ms")]
    #[diagnostic(code(condition::cancellation_race))]
    CancellationRace { generation: u64, elapsed_ms: u64 },

    #[error("Wait cycle {generation} superseded by a new start")]
    #[diagnostic(
        code(condition::superseded),
        help("Only one wait cycle may be in flight per condition. Await it before re-arming.")
    )]
    Superseded { generation: u64 },

    #[error("Condition is not armed")]
    #[diagnostic(
        code(condition::not_armed),
        help("Call start() before wait_armed(), or use timed_wait().")
    )]
    NotArmed,

    #[error("Invalid condition configuration: {0}")]
    #[diagnostic(
        code(condition::invalid_config),
        help("Durations are whole milliseconds, e.g. CONDITION_TIMEOUT_MS=5000.")
    )]
    InvalidConfig(String),
}

impl ConditionError {
    /// Severity used when reporting this error to a sink
    pub fn severity(&self) -> Severity {
        match self {
            Self::CancellationRace { .. } => Severity::Info,
            Self::Superseded { .. } | Self::NotArmed => Severity::Warn,
            Self::NullPredicate | Self::InvalidConfig(_) => Severity::Error,
        }
    }
}
