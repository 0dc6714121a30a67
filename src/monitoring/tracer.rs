/*!
 * Tracing
 * Structured logging setup and the default diagnostic sink
 *
 * Features:
 * - `RUST_LOG` filtering via `EnvFilter`
 * - JSON-formatted logs for structured parsing
 * - Severity-routed condition diagnostics
 */

use crate::core::errors::{ConditionError, Severity};
use crate::core::sync::DiagnosticSink;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set to `1` or `true` to emit JSON logs
pub const TRACE_JSON_ENV: &str = "CONDITION_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - CONDITION_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Diagnostic sink that forwards to `tracing` at the error's severity
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, err: &ConditionError) {
        match err.severity() {
            Severity::Info => info!(error = %err, "condition diagnostic"),
            Severity::Warn => warn!(error = %err, "condition diagnostic"),
            Severity::Error => error!(error = %err, "condition diagnostic"),
        }
    }
}
