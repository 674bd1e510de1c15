//! Error types for MARC to XOBIS transformation.
//!
//! This module provides the [`XobisError`] type for all library operations
//! and the [`Result`] convenience type.
//!
//! Errors fall into two groups. Structural and invariant violations are fatal
//! for the record being transformed: the transformer drops the record and
//! logs the cause. Date parse failures and malformed fields are recoverable:
//! the transformer skips the offending field and carries on.

use thiserror::Error;

/// Error type for all XOBIS library operations.
#[derive(Error, Debug)]
pub enum XobisError {
    /// A builder received a call its element type does not allow, or a value
    /// of the wrong kind (e.g. a Place variant appended to a Being).
    #[error("Structural violation: {0}")]
    Structural(String),

    /// A value failed validation at construction (enumerations, counts,
    /// mutually exclusive parts).
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// A free-form date string could not be interpreted.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A MARC field is missing required data or carries invalid indicators.
    #[error("Malformed field {tag}: {message}")]
    MalformedField {
        /// Field tag
        tag: String,
        /// Description of the problem
        message: String,
    },

    /// The record cannot be classified into any XOBIS element type.
    #[error("Unclassifiable record: {0}")]
    Unclassifiable(String),

    /// Index construction or persistence failed.
    #[error("Index error: {0}")]
    Index(String),

    /// IO error from index persistence.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error from index persistence.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// XML writer error.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
}

impl XobisError {
    /// Shorthand for a [`XobisError::MalformedField`].
    pub fn malformed(tag: impl Into<String>, message: impl Into<String>) -> Self {
        XobisError::MalformedField {
            tag: tag.into(),
            message: message.into(),
        }
    }

    /// Whether the error aborts the record it occurred in.
    ///
    /// Structural and invariant violations are fatal; everything else is
    /// logged and the transformation continues with the next field.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            XobisError::Structural(_) | XobisError::Invariant(_) | XobisError::Unclassifiable(_)
        )
    }
}

/// Convenience type alias for [`std::result::Result`] with [`XobisError`].
pub type Result<T> = std::result::Result<T, XobisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_kinds() {
        assert!(XobisError::Structural("x".into()).is_fatal());
        assert!(XobisError::Invariant("x".into()).is_fatal());
        assert!(!XobisError::InvalidDate("x".into()).is_fatal());
        assert!(!XobisError::malformed("260", "bad indicator").is_fatal());
    }

    #[test]
    fn test_display() {
        let err = XobisError::malformed("264", "invalid indicator 2 '9'");
        assert_eq!(
            err.to_string(),
            "Malformed field 264: invalid indicator 2 '9'"
        );
        let err = XobisError::InvalidDate("??".into());
        assert_eq!(err.to_string(), "Invalid date: \"??\"");
    }
}
