//! Diagnostic-sink capability.
//!
//! The date engine and the holiday loaders emit advisory messages for
//! unreadable holiday files, skipped holiday lines, and failed
//! date-interpretation attempts. The sink they report to is injected at
//! construction; when none is supplied, [`default_sink`] forwards to the
//! `tracing` ecosystem at DEBUG level.

use std::sync::Arc;

/// Receives advisory diagnostic messages.
///
/// Diagnostics never change control flow; a sink is free to drop them.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic message.
    fn diagnostic(&self, message: &str);
}

/// Forwards diagnostics to `tracing` at DEBUG level under the `bizdays`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn diagnostic(&self, message: &str) {
        tracing::debug!(target: "bizdays", "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn diagnostic(&self, _message: &str) {}
}

/// The process-wide default sink, used when none is injected.
pub fn default_sink() -> Arc<dyn DiagnosticSink> {
    Arc::new(TracingSink)
}
