//! MARC to XOBIS record transformation.
//!
//! A [`Transformer`] borrows a read-only [`Indexer`] and a
//! [`TransformConfig`] and turns one MARC record at a time into a XOBIS
//! record. Each record goes through a linear pipeline:
//!
//! 1. suppressed records and excluded cataloging sources are skipped;
//! 2. the record is classified into an [`ElementType`];
//! 3. a cloned copy is [preprocessed](preprocess);
//! 4. control data, the principal element (entry, variants, notes) and the
//!    relationships are emitted.
//!
//! Recoverable problems become [`Diagnostic`]s and the record carries on;
//! a fatal error drops only the record it occurred in.
//!
//! # Examples
//!
//! ```
//! use xobis::{Field, Indexer, Leader, Record, TransformConfig, Transformer};
//!
//! let indexer = Indexer::new();
//! let config = TransformConfig::default();
//! let transformer = Transformer::new(&indexer, &config);
//!
//! let record = Record::builder(Leader::authority())
//!     .control_field("001", "42")
//!     .field(Field::from_pairs("100", '1', ' ', &[('a', "Smith, John,"), ('d', "1920-1980")]))
//!     .build();
//! let xobis = transformer.transform(&record).unwrap();
//! assert_eq!(xobis.control_data.id.value, "(CStL)Z42");
//! ```

mod control_data;
mod element;
mod notes;
pub mod preprocess;
mod relationships;
mod variants;

pub use variants::{entry_group, includes_marker};

use crate::builders::RecordBuilder;
use crate::config::TransformConfig;
use crate::diagnostics::{Diagnostic, LogSink, TracingSink};
use crate::element_type::{get_xobis_element_type, ElementType};
use crate::error::{Result, XobisError};
use crate::indexer::Indexer;
use crate::leader::RecordKind;
use crate::name_parser::NameParser;
use crate::record::Record as MarcRecord;
use crate::xobis::{GenericType, LinkAttributes, Record};
use rayon::prelude::*;
use std::fmt;
use tracing::debug;

static TRACING_SINK: TracingSink = TracingSink;

/// Transforms MARC records into XOBIS records.
///
/// The transformer holds only shared references, so one instance can serve
/// many threads; see [`Transformer::transform_all`].
#[derive(Clone, Copy)]
pub struct Transformer<'a> {
    indexer: &'a Indexer,
    config: &'a TransformConfig,
    sink: &'a dyn LogSink,
}

impl fmt::Debug for Transformer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("indexer", &self.indexer.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> Transformer<'a> {
    /// A transformer that logs diagnostics through `tracing`.
    #[must_use]
    pub fn new(indexer: &'a Indexer, config: &'a TransformConfig) -> Self {
        Transformer {
            indexer,
            config,
            sink: &TRACING_SINK,
        }
    }

    /// Send diagnostics to `sink` instead.
    #[must_use]
    pub fn with_sink(mut self, sink: &'a dyn LogSink) -> Self {
        self.sink = sink;
        self
    }

    /// The identity index.
    #[must_use]
    pub fn indexer(&self) -> &'a Indexer {
        self.indexer
    }

    /// The transformation options.
    #[must_use]
    pub fn config(&self) -> &'a TransformConfig {
        self.config
    }

    /// Transform one record; `None` when it is skipped or fails.
    #[must_use]
    pub fn transform(&self, record: &MarcRecord) -> Option<Record> {
        self.transform_with_diagnostics(record).0
    }

    /// Transform one record and return its diagnostics as well.
    ///
    /// Diagnostics are also handed to the log sink.
    #[must_use]
    pub fn transform_with_diagnostics(&self, record: &MarcRecord) -> (Option<Record>, Vec<Diagnostic>) {
        let id = record.control_number().map(str::to_string);
        if let Some(reason) = skip_reason(record, self.config) {
            debug!(record = %id.as_deref().unwrap_or("-"), reason, "record skipped");
            return (None, Vec::new());
        }

        let element_type = match get_xobis_element_type(record) {
            Ok(element_type) => element_type,
            Err(err) => {
                let diagnostics = vec![Diagnostic::from_error(id.as_deref(), None, &err)];
                self.log(&diagnostics);
                return (None, diagnostics);
            }
        };

        let (preprocessed, warnings) = preprocess::preprocess(record, element_type);
        let mut context = RecordTransform {
            element_type,
            kind: record.leader.kind(),
            id,
            parser: NameParser::new(self.indexer, self.config),
            diagnostics: Vec::new(),
        };
        let result = context
            .recover_all(None, warnings)
            .and_then(|()| context.run(&preprocessed));

        let RecordTransform { id, mut diagnostics, .. } = context;
        let output = match result {
            Ok(xobis) => {
                debug!(record = %id.as_deref().unwrap_or("-"), %element_type, "record transformed");
                Some(xobis)
            }
            Err(err) => {
                diagnostics.push(Diagnostic::from_error(id.as_deref(), None, &err));
                None
            }
        };
        self.log(&diagnostics);
        (output, diagnostics)
    }

    /// Transform a batch in parallel; output order matches input order.
    #[must_use]
    pub fn transform_all(&self, records: &[MarcRecord]) -> Vec<Option<Record>> {
        records.par_iter().map(|record| self.transform(record)).collect()
    }

    fn log(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            self.sink.log(diagnostic);
        }
    }
}

/// Whether a record is suppressed: deleted in Leader/05, or flagged by a
/// 903 `$a` of `Suppressed`.
#[must_use]
pub fn is_suppressed(record: &MarcRecord) -> bool {
    record.leader.is_deleted()
        || record
            .get_subfields("903", &['a'])
            .iter()
            .any(|value| value.trim() == "Suppressed")
}

fn skip_reason(record: &MarcRecord, config: &TransformConfig) -> Option<&'static str> {
    if is_suppressed(record) {
        return Some("suppressed");
    }
    if record
        .cataloging_source()
        .is_some_and(|source| config.is_excluded_source(source))
    {
        return Some("excluded cataloging source");
    }
    None
}

/// State of one record's transformation.
///
/// Stage methods live in the sibling modules and take the preprocessed MARC
/// record as an argument.
struct RecordTransform<'t> {
    element_type: ElementType,
    kind: RecordKind,
    id: Option<String>,
    parser: NameParser<'t>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> RecordTransform<'t> {
    fn run(&mut self, record: &MarcRecord) -> Result<Record> {
        let mut builder = RecordBuilder::new();
        builder.set_lang(self.config().record_language.clone());
        self.control_data(record, &mut builder)?;
        let element = match self.element_type {
            ElementType::Holdings => self.holdings(record)?,
            _ => self.principal_element(record)?,
        };
        builder.set_principal_element(element);
        for relationship in self.relationships(record)? {
            builder.add_relationship(relationship);
        }
        builder.build()
    }

    fn indexer(&self) -> &'t Indexer {
        self.parser.indexer()
    }

    fn config(&self) -> &'t TransformConfig {
        self.parser.config()
    }

    fn is_authority(&self) -> bool {
        self.kind == RecordKind::Authority
    }

    /// Log a recoverable error, or return it when it must abort the record.
    ///
    /// In strict mode malformed fields abort the record too.
    fn recover(&mut self, tag: Option<&str>, error: XobisError) -> Result<()> {
        let strict_failure = self.config().strict && matches!(error, XobisError::MalformedField { .. });
        if error.is_fatal() || strict_failure {
            return Err(error);
        }
        self.diagnostics
            .push(Diagnostic::from_error(self.id.as_deref(), tag, &error));
        Ok(())
    }

    fn recover_all(&mut self, tag: Option<&str>, errors: Vec<XobisError>) -> Result<()> {
        for error in errors {
            self.recover(tag, error)?;
        }
        Ok(())
    }

    /// Control number of a Concept with this title, or a sentinel.
    fn concept_href(&self, title: &str) -> String {
        self.indexer().simple_lookup(title, Some(ElementType::Concept))
    }

    /// Link to a Concept by title.
    fn concept_link(&self, title: &str) -> LinkAttributes {
        LinkAttributes::new(title, Some(self.concept_href(title)))
    }

    /// A generic type linked to its Concept, with the role of the Concept
    /// that groups such types ("Subset", "Note Type", "Action Type" ...).
    fn generic_type(&self, title: &str, role: &str) -> Result<GenericType> {
        GenericType::new(title, Some(self.concept_href(title)), Some(self.concept_href(role)))
    }
}
