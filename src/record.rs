//! MARC record structures consumed by the transformer.
//!
//! This module provides the already-parsed MARC input the XOBIS pipeline reads:
//! - [`Record`] - A MARC record (leader, control fields, data fields)
//! - [`Field`] - Variable data fields (010+)
//! - [`Subfield`] - Named data elements within fields
//!
//! Reading records off the wire is left to a MARC reader; this crate only
//! needs the accessor surface below. Data fields are kept in a flat list in
//! record order so that relationships, notes and variants come out in the
//! same order the cataloger entered them, and so that preprocessing can
//! rewrite fields in place.
//!
//! # Examples
//!
//! ```
//! use xobis::{Field, Leader, Record};
//!
//! let record = Record::builder(Leader::authority())
//!     .control_field("001", "12345")
//!     .field(
//!         Field::builder("100", '1', ' ')
//!             .subfield('a', "Smith, John,")
//!             .subfield('d', "1920-1980.")
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(record.get_subfields("100", &['a']), vec!["Smith, John,"]);
//! ```

use crate::leader::Leader;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A MARC record
///
/// Control fields are keyed by tag; data fields keep record order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Record leader (24 bytes)
    pub leader: Leader,
    /// Control fields (000-009) - tag -> value, preserves insertion order
    pub control_fields: IndexMap<String, String>,
    /// Data fields (010+) in record order
    pub fields: Vec<Field>,
}

/// A data field in a MARC record (fields 010 and higher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 digits)
    pub tag: String,
    /// First indicator
    pub indicator1: char,
    /// Second indicator
    pub indicator2: char,
    /// Subfields (stored in `SmallVec` to avoid allocation for typical fields with 4 or fewer subfields)
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character)
    pub code: char,
    /// Subfield value
    pub value: String,
}

impl Subfield {
    /// Create a subfield
    pub fn new(code: char, value: impl Into<String>) -> Self {
        Subfield {
            code,
            value: value.into(),
        }
    }
}

impl Record {
    /// Create a new MARC record with the given leader
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Record {
            leader,
            control_fields: IndexMap::new(),
            fields: Vec::new(),
        }
    }

    /// Create a builder for fluently constructing MARC records
    #[must_use]
    pub fn builder(leader: Leader) -> RecordBuilder {
        RecordBuilder {
            record: Record::new(leader),
        }
    }

    /// Add or replace a control field (000-009)
    pub fn add_control_field(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.control_fields.insert(tag.into(), value.into());
    }

    /// Get a control field value
    #[must_use]
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields.get(tag).map(String::as_str)
    }

    /// Append a data field
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over all data fields in record order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Iterate over fields matching a specific tag
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// All fields whose tag is one of `tags`, in record order.
    #[must_use]
    pub fn get_fields(&self, tags: &[&str]) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| tags.contains(&f.tag.as_str()))
            .collect()
    }

    /// First field with a given tag
    #[must_use]
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Values of the given subfield codes across every field with `tag`.
    #[must_use]
    pub fn get_subfields(&self, tag: &str, codes: &[char]) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.tag == tag)
            .flat_map(|f| f.get_subfields(codes))
            .collect()
    }

    /// Iterate mutably over all data fields
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut()
    }

    /// Replace every field by the output of `operation`, which may expand a
    /// field into several, keep it, or drop it.
    pub fn flat_map_fields<F>(&mut self, mut operation: F)
    where
        F: FnMut(Field) -> Vec<Field>,
    {
        let old = std::mem::take(&mut self.fields);
        for field in old {
            self.fields.extend(operation(field));
        }
    }

    /// Control number (001)
    #[must_use]
    pub fn control_number(&self) -> Option<&str> {
        self.get_control_field("001").map(str::trim)
    }

    /// Fixed-length data elements (008)
    #[must_use]
    pub fn fixed_field(&self) -> Option<&str> {
        self.get_control_field("008")
    }

    /// Character positions `start..end` of the 008, if present and long enough.
    #[must_use]
    pub fn fixed_field_slice(&self, start: usize, end: usize) -> Option<String> {
        let f008: Vec<char> = self.fixed_field()?.chars().collect();
        if f008.len() < end {
            return None;
        }
        Some(f008[start..end].iter().collect())
    }

    /// Single 008 character position.
    #[must_use]
    pub fn fixed_field_byte(&self, position: usize) -> Option<char> {
        self.fixed_field()?.chars().nth(position)
    }

    /// Cataloging source (040 `$a`)
    #[must_use]
    pub fn cataloging_source(&self) -> Option<&str> {
        self.get_field("040")
            .and_then(|f| f.get_subfield('a'))
            .map(str::trim)
    }
}

/// Builder for fluently constructing MARC records
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    /// Add a control field to the record being built
    #[must_use]
    pub fn control_field(mut self, tag: &str, value: &str) -> Self {
        self.record.add_control_field(tag, value);
        self
    }

    /// Add a data field to the record being built
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.record.add_field(field);
        self
    }

    /// Build the record
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

impl Field {
    /// Create a new data field
    pub fn new(tag: impl Into<String>, indicator1: char, indicator2: char) -> Self {
        Field {
            tag: tag.into(),
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Create a field from `(code, value)` pairs.
    pub fn from_pairs(
        tag: impl Into<String>,
        indicator1: char,
        indicator2: char,
        pairs: &[(char, &str)],
    ) -> Self {
        let mut field = Field::new(tag, indicator1, indicator2);
        for (code, value) in pairs {
            field.add_subfield(*code, *value);
        }
        field
    }

    /// Create a builder for constructing fields fluently
    pub fn builder(tag: impl Into<String>, indicator1: char, indicator2: char) -> FieldBuilder {
        FieldBuilder {
            field: Field::new(tag, indicator1, indicator2),
        }
    }

    /// Add a subfield
    pub fn add_subfield(&mut self, code: char, value: impl Into<String>) {
        self.subfields.push(Subfield::new(code, value));
    }

    /// Get all values for a subfield code
    #[must_use]
    pub fn get_subfield_values(&self, code: char) -> Vec<&str> {
        self.subfields_by_code(code).collect()
    }

    /// Get first value for a subfield code
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Whether the field carries a subfield with this code
    #[must_use]
    pub fn has_subfield(&self, code: char) -> bool {
        self.subfields.iter().any(|sf| sf.code == code)
    }

    /// Iterate over all subfields
    pub fn subfields(&self) -> impl Iterator<Item = &Subfield> {
        self.subfields.iter()
    }

    /// Iterate over subfields with a specific code
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Get all subfield values matching any of the given codes, in field order
    #[must_use]
    pub fn get_subfields(&self, codes: &[char]) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| codes.contains(&sf.code))
            .map(|sf| sf.value.as_str())
            .collect()
    }

    /// Values of the given codes joined by single spaces.
    #[must_use]
    pub fn join_subfields(&self, codes: &[char]) -> String {
        self.get_subfields(codes)
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get the field's content as a single string (all subfields, space separated)
    #[must_use]
    pub fn value(&self) -> String {
        self.subfields
            .iter()
            .map(|sf| sf.value.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Subfields that come before the first occurrence of `code`.
    ///
    /// Returns every subfield when `code` does not occur.
    #[must_use]
    pub fn subfields_before(&self, code: char) -> Vec<&Subfield> {
        self.subfields.iter().take_while(|sf| sf.code != code).collect()
    }

    /// Subfields from the first occurrence of `code` onward.
    #[must_use]
    pub fn subfields_from(&self, code: char) -> Vec<&Subfield> {
        self.subfields.iter().skip_while(|sf| sf.code != code).collect()
    }

    /// Remove all subfields with a given code
    ///
    /// Returns the removed subfields.
    pub fn remove_subfields(&mut self, code: char) -> Vec<Subfield> {
        let mut removed = Vec::new();
        self.subfields.retain(|sf| {
            if sf.code == code {
                removed.push(sf.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Update the first subfield with `code`, or append one.
    pub fn set_subfield(&mut self, code: char, value: impl Into<String>) {
        let value = value.into();
        match self.subfields.iter_mut().find(|sf| sf.code == code) {
            Some(subfield) => subfield.value = value,
            None => self.add_subfield(code, value),
        }
    }

    /// Copy of this field under another tag.
    #[must_use]
    pub fn retagged(&self, tag: &str) -> Field {
        Field {
            tag: tag.to_string(),
            ..self.clone()
        }
    }
}

/// Builder for fluently constructing MARC fields
#[derive(Debug)]
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Add a subfield to the field being built
    #[must_use]
    pub fn subfield(mut self, code: char, value: &str) -> Self {
        self.field.add_subfield(code, value);
        self
    }

    /// Build the field
    #[must_use]
    pub fn build(self) -> Field {
        self.field
    }
}
