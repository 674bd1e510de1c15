//! Configuration options for MARC to XOBIS transformation.
//!
//! This module provides the [`TransformConfig`] struct which controls how
//! control numbers are minted, which records are skipped, and how strictly
//! malformed fields are treated.

use crate::leader::RecordKind;

/// Configuration for the transformer and the identity indexer.
///
/// # Examples
///
/// ```
/// use xobis::TransformConfig;
///
/// let config = TransformConfig::default()
///     .with_excluded_source("OCoLC")
///     .with_strict(true);
/// assert_eq!(config.control_number_prefix, "(CStL)");
/// assert!(config.is_excluded_source("OCoLC"));
/// ```
#[derive(Debug, Clone)]
pub struct TransformConfig {
    // === Identity ===
    /// Prefix of every minted control number, e.g. `(CStL)`.
    pub control_number_prefix: String,

    /// Display name of the institution, used as the description of record ids.
    pub institution_name: String,

    /// Record-kind prefix for bibliographic records.
    pub bibliographic_prefix: String,

    /// Record-kind prefix for authority records.
    pub authority_prefix: String,

    /// Record-kind prefix for holdings records.
    pub holdings_prefix: String,

    // === Output ===
    /// Language of every produced record.
    pub record_language: String,

    // === Filtering ===
    /// Cataloging sources (040 `$a`) whose records are skipped.
    pub excluded_sources: Vec<String>,

    // === Error Handling ===
    /// Treat malformed-field warnings as fatal for the record.
    ///
    /// When false (default), a malformed field is logged and skipped.
    pub strict: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            control_number_prefix: "(CStL)".to_string(),
            institution_name: "Lane Medical Library".to_string(),
            bibliographic_prefix: "L".to_string(),
            authority_prefix: "Z".to_string(),
            holdings_prefix: "H".to_string(),
            record_language: "eng".to_string(),
            excluded_sources: Vec::new(),
            strict: false,
        }
    }
}

impl TransformConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the control number prefix.
    #[must_use]
    pub fn with_control_number_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.control_number_prefix = prefix.into();
        self
    }

    /// Sets the institution name.
    #[must_use]
    pub fn with_institution_name(mut self, name: impl Into<String>) -> Self {
        self.institution_name = name.into();
        self
    }

    /// Sets the record language.
    #[must_use]
    pub fn with_record_language(mut self, lang: impl Into<String>) -> Self {
        self.record_language = lang.into();
        self
    }

    /// Adds a cataloging source to skip.
    #[must_use]
    pub fn with_excluded_source(mut self, source: impl Into<String>) -> Self {
        self.excluded_sources.push(source.into());
        self
    }

    /// Sets strict mode.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether records from this cataloging source are skipped.
    #[must_use]
    pub fn is_excluded_source(&self, source: &str) -> bool {
        self.excluded_sources.iter().any(|s| s == source)
    }

    /// Record-kind prefix.
    #[must_use]
    pub fn kind_prefix(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Bibliographic => &self.bibliographic_prefix,
            RecordKind::Authority => &self.authority_prefix,
            RecordKind::Holdings => &self.holdings_prefix,
        }
    }

    /// Full control number for a record kind and 001 value, e.g. `(CStL)Z123`.
    #[must_use]
    pub fn control_number(&self, kind: RecordKind, local: &str) -> String {
        format!(
            "{}{}{}",
            self.control_number_prefix,
            self.kind_prefix(kind),
            local.trim()
        )
    }

    /// Whether a linking-field value is one of this institution's control numbers.
    #[must_use]
    pub fn is_local_control_number(&self, value: &str) -> bool {
        value.trim().starts_with(&self.control_number_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformConfig::default();
        assert_eq!(config.record_language, "eng");
        assert!(!config.strict);
        assert!(config.excluded_sources.is_empty());
    }

    #[test]
    fn test_control_numbers() {
        let config = TransformConfig::new();
        assert_eq!(config.control_number(RecordKind::Authority, " 123 "), "(CStL)Z123");
        assert_eq!(config.control_number(RecordKind::Bibliographic, "9"), "(CStL)L9");
        assert_eq!(config.control_number(RecordKind::Holdings, "7"), "(CStL)H7");
        assert!(config.is_local_control_number("(CStL)Z123"));
        assert!(!config.is_local_control_number("(DLC)n79021164"));
    }

    #[test]
    fn test_builder_methods() {
        let config = TransformConfig::new()
            .with_control_number_prefix("(XyZ)")
            .with_institution_name("Test Library")
            .with_record_language("fre")
            .with_excluded_source("DLC")
            .with_strict(true);
        assert_eq!(config.control_number(RecordKind::Authority, "1"), "(XyZ)Z1");
        assert_eq!(config.institution_name, "Test Library");
        assert!(config.is_excluded_source("DLC"));
        assert!(config.strict);
    }
}
