/*!
 * Core
 * Error taxonomy and synchronization primitives
 */

pub mod errors;
pub mod sync;

pub use errors::{ConditionError, ConditionResult, Severity};
