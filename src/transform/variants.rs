//! Variant entries (246 and authority 4XX).

use super::RecordTransform;
use crate::builders::{PrincipalElementBuilder, VariantBuilder};
use crate::element_type::{heading_element_type, ElementType};
use crate::error::{Result, XobisError};
use crate::indexer::EQUIVALENCE;
use crate::name_parser::trim_name;
use crate::record::{Field, Record as MarcRecord};
use crate::tables::relator_code;
use crate::xobis::{Content, EntryGroupAttributes, Includes, Note, NoteClass, VariantEntry};

/// Parse a `$8` entry group: `group[.id][\p]`, where `\p` marks the
/// preferred entry.
///
/// # Examples
///
/// ```
/// use xobis::transform::entry_group;
///
/// let group = entry_group("3.1\\p");
/// assert_eq!(group.group.as_deref(), Some("3"));
/// assert_eq!(group.id.as_deref(), Some("1"));
/// assert_eq!(group.preferred, Some(true));
/// ```
#[must_use]
pub fn entry_group(value: &str) -> EntryGroupAttributes {
    let value = value.trim();
    let (value, preferred) = match value.strip_suffix("\\p") {
        Some(rest) => (rest, Some(true)),
        None => (value, None),
    };
    let (group, id) = match value.split_once('.') {
        Some((group, id)) => (group, Some(id)),
        None => (value, None),
    };
    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_string());
    EntryGroupAttributes {
        id: id.and_then(non_empty),
        group: non_empty(group),
        preferred,
    }
}

/// The sumption marker in a relator such as `includes broader`.
#[must_use]
pub fn includes_marker(relator: &str) -> Option<Includes> {
    let relator = trim_name(relator).to_lowercase();
    let rest = relator.strip_prefix("includes")?.trim();
    Includes::parse(rest).ok()
}

/// Documentation notes from `$1` subfields.
pub(super) fn documentation_notes(field: &Field) -> Vec<Note> {
    field
        .subfields_by_code('1')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| Note::new(Content::new(text)).with_class(NoteClass::Documentation))
        .collect()
}

impl RecordTransform<'_> {
    pub(super) fn variants(&mut self, record: &MarcRecord, builder: &mut PrincipalElementBuilder) -> Result<()> {
        for field in record.fields() {
            let Some(element_type) = self.variant_type(field) else {
                continue;
            };
            if element_type != self.element_type {
                self.recover(
                    Some(&field.tag),
                    XobisError::malformed(
                        &field.tag,
                        format!("{element_type} variant in a {} record", self.element_type),
                    ),
                )?;
                continue;
            }
            if let Some(variant) = self.variant(field, element_type)? {
                builder.add_variant(variant)?;
            }
        }
        Ok(())
    }

    /// Element type of a variant-bearing field, `None` for other fields.
    fn variant_type(&self, field: &Field) -> Option<ElementType> {
        match (self.is_authority(), field.tag.as_str()) {
            (false, "246") => Some(self.element_type),
            (true, tag) if tag.starts_with('4') => match heading_element_type(field)? {
                ElementType::Concept if tag == "450" => Some(self.element_type),
                other => Some(other),
            },
            _ => None,
        }
    }

    fn variant(&mut self, field: &Field, element_type: ElementType) -> Result<Option<VariantEntry>> {
        let mut variant = VariantBuilder::new(element_type);
        if let Some(group) = field.get_subfield('8') {
            variant.set_group(entry_group(group));
        }

        let mut typed = false;
        for relator in field.get_subfield_values(relator_code(&field.tag)) {
            match includes_marker(relator) {
                Some(includes) if element_type.is_concept_family() => {
                    variant.set_includes(includes)?;
                }
                _ if typed => {}
                _ => {
                    let title = trim_name(relator);
                    if !title.is_empty() {
                        variant.set_type(self.generic_type(&title, EQUIVALENCE)?);
                        typed = true;
                    }
                }
            }
        }

        let start = field.get_subfield('7');
        let end = field.get_subfield('9');
        if start.is_some() || end.is_some() {
            match self.parser.dates().parse_span(start, end) {
                Ok(time) => {
                    variant.set_time(time);
                }
                Err(err) => self.recover(Some(&field.tag), err)?,
            }
        }

        let parsed = self.parser.parse(field, element_type);
        let has_name = parsed.has_name();
        self.recover_all(Some(&field.tag), parsed.warnings)?;
        if !has_name {
            return Ok(None);
        }
        variant.entry_mut().add_items(parsed.items)?;

        for note in documentation_notes(field) {
            variant.add_note(note);
        }
        variant.build().map(Some)
    }
}
