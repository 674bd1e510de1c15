#![warn(missing_docs)]

//! # xobis: MARC to XOBIS transformation
//!
//! Converts MARC authority, bibliographic and holdings records into
//! [XOBIS](http://www.xobis.info/ns/2.0/) records: one principal element
//! (Being, Concept, Event, Language, Object, Organization, Place, String,
//! Time, Work or Holdings) with its entry, variants and notes, plus the
//! relationships it has to other records.
//!
//! ## Quick Start
//!
//! ```
//! use xobis::{Field, Indexer, Leader, Record, TransformConfig, Transformer};
//!
//! let authorities = vec![Record::builder(Leader::authority())
//!     .control_field("001", "7")
//!     .field(Field::from_pairs("100", '1', ' ', &[('a', "Osler, William,"), ('d', "1849-1919.")]))
//!     .build()];
//!
//! let config = TransformConfig::default();
//! let indexer = Indexer::build(&authorities, &config);
//! let transformer = Transformer::new(&indexer, &config);
//!
//! for xobis in transformer.transform_all(&authorities).into_iter().flatten() {
//!     let xml = xobis.to_xml_string().unwrap();
//!     assert!(xml.contains("<being"));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`record`]: MARC records, fields and subfields
//! - [`leader`]: the MARC leader and record kinds
//! - [`field_linkage`]: 880 alternate graphic representation linkage
//! - [`element_type`]: record classification into XOBIS element types
//! - [`indexer`]: identity index over a corpus of records
//! - [`datetime`]: free-text date parsing into time and duration refs
//! - [`name_parser`]: names and qualifiers from heading fields
//! - [`builders`]: validated construction of XOBIS values
//! - [`transform`]: the per-record MARC to XOBIS pipeline
//! - [`xobis`]: the XOBIS object graph and its XML serialization
//! - [`diagnostics`]: warnings and errors emitted while transforming

#[macro_use]
mod macros;

pub mod builders;
pub mod config;
pub mod datetime;
pub mod diagnostics;
pub mod element_type;
pub mod error;
pub mod field_linkage;
pub mod indexer;
pub mod leader;
pub mod name_parser;
/// Core MARC record structures (`Record`, `Field`, `Subfield`)
pub mod record;
pub mod tables;
pub mod transform;
pub mod xml;
pub mod xobis;

pub use config::TransformConfig;
pub use diagnostics::{CollectingSink, Diagnostic, LogSink, Severity, TracingSink};
pub use element_type::{get_xobis_element_type, ElementType};
pub use error::{Result, XobisError};
pub use field_linkage::LinkageInfo;
pub use indexer::Indexer;
pub use leader::{Leader, RecordKind};
pub use record::{Field, Record, Subfield};
pub use transform::Transformer;
