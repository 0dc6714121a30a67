/*!
 * Monitoring
 * Tracing setup and the tracing-backed diagnostic sink
 */

mod tracer;

pub use tracer::{init_tracing, TracingSink, TRACE_JSON_ENV};
