//! Non-fatal diagnostics raised during graph construction.
//!
//! Conditions that exclude content without aborting construction (currently
//! only keyless form fields) are reported through an injectable
//! [`DiagnosticSink`] instead of a hidden global log call. The default sink
//! forwards to the `log` crate; [`CollectSink`] lets callers inspect
//! diagnostics programmatically.

use std::fmt;

/// The kind of a non-fatal condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A KEY-tagged key/value block whose key resolved to no content; the
    /// field is excluded from the form.
    KeylessField,
}

/// One non-fatal condition encountered during construction.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// What happened
    pub kind: DiagnosticKind,
    /// Id of the block involved, when one exists
    pub block_id: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn keyless_field(block_id: impl Into<String>) -> Self {
        let block_id = block_id.into();
        Self {
            message: format!(
                "detected K/V set {} where key has no content; excluding field from form",
                block_id
            ),
            kind: DiagnosticKind::KeylessField,
            block_id: Some(block_id),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Receiver for non-fatal diagnostics.
pub trait DiagnosticSink {
    /// Called once per diagnostic, in the order conditions are encountered.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Default sink: forwards diagnostics to `log::warn!`.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
    }
}

/// Sink that accumulates diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectSink {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected diagnostics, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether anything was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_sink() {
        let mut sink = CollectSink::new();
        assert!(sink.is_empty());

        sink.report(Diagnostic::keyless_field("kv-1"));
        assert_eq!(sink.diagnostics().len(), 1);
        assert_eq!(sink.diagnostics()[0].kind, DiagnosticKind::KeylessField);
        assert_eq!(sink.diagnostics()[0].block_id.as_deref(), Some("kv-1"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::keyless_field("kv-9");
        assert!(diagnostic.to_string().contains("kv-9"));
        assert!(diagnostic.to_string().contains("no content"));
    }
}
