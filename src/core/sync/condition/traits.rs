/*!
 * Condition Traits
 *
 * Injectable diagnostic sink so the condition carries no hidden
 * dependency on a process-wide logger.
 */

use crate::core::errors::ConditionError;

/// Receiver for diagnostics raised while waiting
///
/// Implementations must not panic and should return quickly; `report`
/// may be called while a waiter is settling.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic. Never propagated to the waiting caller.
    fn report(&self, error: &ConditionError);
}

/// Sink that drops every diagnostic
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    #[inline]
    fn report(&self, _error: &ConditionError) {}
}
