//! Common test helpers and fixtures shared across the test suite.

use xobis::{Field, Indexer, Leader, Record, TransformConfig, Transformer};

/// Creates an authority record with a control number and the given fields.
pub fn authority(local: &str, fields: Vec<Field>) -> Record {
    with_fields(Record::builder(Leader::authority()).control_field("001", local).build(), fields)
}

/// Creates a monographic language-material bib record.
#[allow(dead_code)]
pub fn monograph(local: &str, fields: Vec<Field>) -> Record {
    with_fields(
        Record::builder(Leader::bibliographic('a', 'm'))
            .control_field("001", local)
            .build(),
        fields,
    )
}

/// Creates a holdings record for the bib record `linked`.
#[allow(dead_code)]
pub fn holdings(local: &str, linked: &str, fields: Vec<Field>) -> Record {
    with_fields(
        Record::builder(Leader::holdings())
            .control_field("001", local)
            .control_field("004", linked)
            .build(),
        fields,
    )
}

/// A broad category field (655 47).
#[allow(dead_code)]
pub fn broad_category(category: &str) -> Field {
    Field::from_pairs("655", '4', '7', &[('a', category)])
}

fn with_fields(mut record: Record, fields: Vec<Field>) -> Record {
    for field in fields {
        record.add_field(field);
    }
    record
}

/// Transforms one record against an index built from `corpus`.
///
/// Panics when the record is skipped or fails.
#[allow(dead_code)]
pub fn transform_with(corpus: &[Record], record: &Record) -> xobis::xobis::Record {
    let config = TransformConfig::default();
    let indexer = Indexer::build(corpus, &config);
    Transformer::new(&indexer, &config)
        .transform(record)
        .expect("record should transform")
}

/// Transforms one record against an empty index.
#[allow(dead_code)]
pub fn transform(record: &Record) -> xobis::xobis::Record {
    transform_with(&[], record)
}
