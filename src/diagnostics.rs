//! Per-record diagnostics and pluggable log sinks.
//!
//! Recoverable problems (malformed fields, unparsable dates) never abort a
//! record. They are collected as [`Diagnostic`]s while the record is
//! transformed and handed to a [`LogSink`]. The default sink forwards to
//! `tracing`.

use crate::error::XobisError;
use std::fmt;
use std::sync::Mutex;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The field was skipped, the record continues
    Warning,
    /// The record was dropped
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One problem found while transforming a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Control number (001) of the record, when known
    pub record: Option<String>,
    /// Tag of the offending field, when known
    pub tag: Option<String>,
    /// Severity
    pub severity: Severity,
    /// Description
    pub message: String,
}

impl Diagnostic {
    /// A warning about a field.
    pub fn warning(record: Option<&str>, tag: Option<&str>, message: impl Into<String>) -> Self {
        Diagnostic {
            record: record.map(str::to_string),
            tag: tag.map(str::to_string),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// A diagnostic describing an error; fatal errors get [`Severity::Error`].
    pub fn from_error(record: Option<&str>, tag: Option<&str>, error: &XobisError) -> Self {
        let tag = match error {
            XobisError::MalformedField { tag, .. } => Some(tag.as_str()),
            _ => tag,
        };
        Diagnostic {
            record: record.map(str::to_string),
            tag: tag.map(str::to_string),
            severity: if error.is_fatal() {
                Severity::Error
            } else {
                Severity::Warning
            },
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(record) = &self.record {
            write!(f, " [{record}]")?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " {tag}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Destination for diagnostics.
pub trait LogSink: Send + Sync {
    /// Record one diagnostic.
    fn log(&self, diagnostic: &Diagnostic);
}

/// Sink that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, diagnostic: &Diagnostic) {
        let record = diagnostic.record.as_deref().unwrap_or("-");
        let tag = diagnostic.tag.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Warning => {
                tracing::warn!(record = %record, tag = %tag, "{}", diagnostic.message);
            }
            Severity::Error => {
                tracing::error!(record = %record, tag = %tag, "{}", diagnostic.message);
            }
        }
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// An empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self.diagnostics.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for CollectingSink {
    fn log(&self, diagnostic: &Diagnostic) {
        match self.diagnostics.lock() {
            Ok(mut guard) => guard.push(diagnostic.clone()),
            Err(poisoned) => poisoned.into_inner().push(diagnostic.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_picks_tag_and_severity() {
        let err = XobisError::malformed("264", "invalid indicator 2 '9'");
        let diagnostic = Diagnostic::from_error(Some("123"), None, &err);
        assert_eq!(diagnostic.tag.as_deref(), Some("264"));
        assert_eq!(diagnostic.severity, Severity::Warning);

        let fatal = XobisError::Structural("bad".into());
        assert_eq!(
            Diagnostic::from_error(None, None, &fatal).severity,
            Severity::Error
        );
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::warning(Some("42"), Some("100"), "no name");
        assert_eq!(diagnostic.to_string(), "warning [42] 100: no name");
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.log(&Diagnostic::warning(None, None, "one"));
        sink.log(&Diagnostic::warning(None, None, "two"));
        let messages: Vec<String> = sink.diagnostics().into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["one", "two"]);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink.log(&Diagnostic::warning(Some("1"), Some("650"), "skipped"));
    }
}
