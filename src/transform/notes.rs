//! Notes from note-bearing fields.

use super::RecordTransform;
use crate::builders::build_simple_ref;
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::record::{Field, Record as MarcRecord};
use crate::tables::{note_rule, publication_label, NoteRule, NoteSource};
use crate::xobis::{Content, Note, Ref};

const NOTE_TYPE: &str = "Note Type";

impl RecordTransform<'_> {
    /// Every applicable note, in field order.
    pub(super) fn notes(&mut self, record: &MarcRecord) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for field in record.fields() {
            let Some(rule) = note_rule(&field.tag) else {
                continue;
            };
            if !rule.scope.applies(self.element_type, self.is_authority()) {
                continue;
            }
            let Some(text) = self.note_text(field, rule)? else {
                continue;
            };
            let mut note = Note::new(Content::new(text))
                .with_class(rule.class)
                .with_link(self.concept_link(rule.note_type), Some(self.concept_href(NOTE_TYPE)));
            if let Some(source) = self.note_source(record, rule)? {
                note = note.with_source(source);
            }
            notes.push(note);
        }
        Ok(notes)
    }

    /// Note content, or `None` when the field yields nothing.
    ///
    /// 260 and 264 with unknown indicators are skipped with a warning.
    fn note_text(&mut self, field: &Field, rule: &NoteRule) -> Result<Option<String>> {
        let mut text = field.join_subfields(rule.codes);
        if matches!(rule.tag, "260" | "264") {
            match publication_label(rule.tag, field.indicator1, field.indicator2) {
                Ok(Some(label)) if !text.is_empty() => text = format!("{label}: {text}"),
                Ok(_) => {}
                Err(()) => {
                    self.recover(
                        Some(&field.tag),
                        XobisError::malformed(
                            &field.tag,
                            format!("invalid indicators {:?}{:?}", field.indicator1, field.indicator2),
                        ),
                    )?;
                    return Ok(None);
                }
            }
        }
        Ok((!text.is_empty()).then_some(text))
    }

    fn note_source(&self, record: &MarcRecord, rule: &NoteRule) -> Result<Option<Ref>> {
        let (applies, title, element_type) = match rule.source {
            None => return Ok(None),
            Some(NoteSource::LibraryOfCongress) => (
                record.cataloging_source() == Some("DLC"),
                "Library of Congress",
                ElementType::Organization,
            ),
            Some(NoteSource::Mesh) => (
                record
                    .get_subfields("040", &['f'])
                    .iter()
                    .any(|f| f.trim().eq_ignore_ascii_case("mesh")),
                "MeSH",
                ElementType::Work,
            ),
        };
        if !applies {
            return Ok(None);
        }
        build_simple_ref(title, element_type, self.indexer()).map(Some)
    }
}
