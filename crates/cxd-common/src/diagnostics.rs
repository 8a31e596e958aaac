//! Diagnostics produced during a generation pass.
//!
//! A pass never aborts the process: unsupported constructs surface as inline
//! markers in the output, while structural invariant violations are recorded
//! here and the offending subtree stops emitting. Callers inspect the sink
//! after the pass.

use crate::position::SourceLoc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Option<SourceLoc>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: None,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: None,
            message: message.into(),
        }
    }

    pub fn at(mut self, location: SourceLoc) -> Self {
        self.location = Some(location);
        self
    }
}

/// Ordered collection of diagnostics for one pass.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{FileId, SourceLoc};

    #[test]
    fn sink_records_in_order() {
        let mut sink = DiagnosticSink::new();
        sink.push(Diagnostic::warning("first"));
        sink.push(Diagnostic::error("second").at(SourceLoc::new(FileId(0), 3, 7)));

        assert_eq!(sink.len(), 2);
        assert!(sink.has_errors());
        let messages: Vec<_> = sink.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
