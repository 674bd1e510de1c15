//! Relationships from linking, subject and added-entry fields.

use super::variants::documentation_notes;
use super::RecordTransform;
use crate::builders::RelationshipBuilder;
use crate::datetime::DateContext;
use crate::element_type::{heading_element_type, ElementType};
use crate::error::Result;
use crate::leader::RecordKind;
use crate::name_parser::trim_name;
use crate::record::{Field, Record as MarcRecord};
use crate::tables::{is_linking_entry, link_code, linking_entry_relator, relator_code};
use crate::xobis::{Degree, Ref, Relationship, TimeOrDurationRef};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref YEAR: Regex = Regex::new(r"\b(\d{4})\b").unwrap();
    static ref EDITOR: Regex = Regex::new(r"(?i)\bedit").unwrap();
}

/// Element types a subject or genre term may resolve to.
const TERM_TYPES: [ElementType; 6] = [
    ElementType::Concept,
    ElementType::Language,
    ElementType::Object,
    ElementType::String,
    ElementType::Organization,
    ElementType::Event,
];

/// One relationship-bearing field, resolved to its target.
struct Link<'f> {
    field: Cow<'f, Field>,
    target_type: ElementType,
    names: Vec<String>,
    degree: Option<Degree>,
    enumeration: Option<String>,
}

fn tag_number(tag: &str) -> u16 {
    tag.parse().unwrap_or(0)
}

/// Whether the field carries a relationship in a record of this kind.
fn bears_relationship(kind: RecordKind, field: &Field) -> bool {
    let tag = tag_number(&field.tag);
    match kind {
        RecordKind::Authority => matches!(tag, 500..=585 | 987),
        RecordKind::Bibliographic => {
            if field.tag == "655" && matches!((field.indicator1, field.indicator2), ('4' | '7', '7')) {
                return false;
            }
            matches!(tag, 100 | 110 | 111 | 130 | 240 | 600..=655 | 700..=758 | 760..=789 | 830 | 963)
        }
        RecordKind::Holdings => false,
    }
}

/// Target type of a 94X rewrite, recognized by its indicators.
fn rewrite_type(field: &Field) -> Option<ElementType> {
    match (field.tag.as_str(), field.indicator1, field.indicator2) {
        ("650", '2', '5') => Some(ElementType::Time),
        ("650", '2', '6') => Some(ElementType::Language),
        ("651", '2', '7') => Some(ElementType::Place),
        _ => None,
    }
}

fn degree(field: &Field) -> Option<Degree> {
    if !matches!(tag_number(&field.tag), 600..=655) || rewrite_type(field).is_some() {
        return None;
    }
    match field.indicator1 {
        '1' => Some(Degree::Primary),
        '2' => Some(Degree::Secondary),
        '3' => Some(Degree::Tertiary),
        '4' => Some(Degree::Broad),
        _ => None,
    }
}

/// Enumeration: 830 `$v` as an integer, `1` for main entries.
fn enumeration(kind: RecordKind, field: &Field) -> Option<String> {
    match field.tag.as_str() {
        "100" | "110" | "111" | "130" if kind == RecordKind::Bibliographic => Some("1".to_string()),
        "830" => {
            let digits: String = field
                .get_subfield('v')?
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            digits.parse::<u64>().ok().map(|n| n.to_string())
        }
        _ => None,
    }
}

/// The first four-digit year in a text.
fn first_year(text: &str) -> Option<&str> {
    YEAR.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

/// The name portion of a name-title field, without the title.
fn agent_field(field: &Field) -> Field {
    let mut agent = Field::new(field.tag.clone(), field.indicator1, field.indicator2);
    agent.subfields = field
        .subfields_before('t')
        .into_iter()
        .filter(|sf| sf.code != 'i')
        .cloned()
        .collect();
    agent
}

impl RecordTransform<'_> {
    /// Relationships in field order.
    pub(super) fn relationships(&mut self, record: &MarcRecord) -> Result<Vec<Relationship>> {
        let mut relationships = Vec::new();
        for field in record.fields() {
            if !bears_relationship(self.kind, field) {
                continue;
            }
            let name_title = matches!(field.tag.as_str(), "700" | "710") && field.has_subfield('t');
            if name_title && !self.is_authority() {
                relationships.extend(self.analytic_relationships(field)?);
                continue;
            }
            let link = self.link(record, field);
            relationships.extend(self.emit(link)?);
        }
        Ok(relationships)
    }

    fn link<'f>(&self, record: &MarcRecord, field: &'f Field) -> Link<'f> {
        let field = self.swap_787_dates(field);
        let target_type = self.target_type(&field);
        let names = self.names(record, &field);
        Link {
            degree: degree(&field),
            enumeration: enumeration(self.kind, &field),
            field,
            target_type,
            names,
        }
    }

    /// A bib 700/710 with a title credits an analytic: one relationship to
    /// the Work and one to its Being or Organization.
    fn analytic_relationships(&mut self, field: &Field) -> Result<Vec<Relationship>> {
        let work_names = self.relators(field, 'i');
        let work = Link {
            field: Cow::Borrowed(field),
            target_type: ElementType::Work,
            names: if work_names.is_empty() { vec!["Related".to_string()] } else { work_names },
            degree: None,
            enumeration: None,
        };
        let mut relationships = self.emit(work)?;

        let agent = agent_field(field);
        let agent_names = self.relators(&agent, 'e');
        let agent = Link {
            target_type: if field.tag == "710" { ElementType::Organization } else { ElementType::Being },
            names: if agent_names.is_empty() { vec!["Author".to_string()] } else { agent_names },
            field: Cow::Owned(agent),
            degree: None,
            enumeration: None,
        };
        relationships.extend(self.emit(agent)?);
        Ok(relationships)
    }

    /// One relationship per name, all sharing target, time and notes.
    ///
    /// Fields whose target or dates cannot be read are skipped with a
    /// warning.
    fn emit(&mut self, link: Link<'_>) -> Result<Vec<Relationship>> {
        let field = link.field.as_ref();
        let time = match self.relationship_time(field) {
            Ok(time) => time,
            Err(err) => {
                self.recover(Some(&field.tag), err)?;
                return Ok(Vec::new());
            }
        };
        let target = match self.parser.build_ref(field, link.target_type) {
            Ok((target, warnings)) => {
                self.recover_all(Some(&field.tag), warnings)?;
                target
            }
            Err(err) => {
                self.recover(Some(&field.tag), err)?;
                return Ok(Vec::new());
            }
        };

        let mut relationships = Vec::with_capacity(link.names.len());
        for name in &link.names {
            relationships.push(self.relationship(name, &link, target.clone(), time.clone())?);
        }
        Ok(relationships)
    }

    fn relationship(
        &self,
        name: &str,
        link: &Link<'_>,
        target: Ref,
        time: Option<TimeOrDurationRef>,
    ) -> Result<Relationship> {
        let mut builder = RelationshipBuilder::new();
        let types = self.indexer().lookup_rel_types(name);
        builder
            .set_name(name, Some(self.concept_link(name)))
            .set_type(match types.as_slice() {
                [single] => Some(*single),
                _ => None,
            })
            .set_degree(link.degree)
            .set_time(time)
            .set_target(target);
        if let Some(enumeration) = &link.enumeration {
            builder.set_enumeration(enumeration)?;
        }
        for note in documentation_notes(&link.field) {
            builder.add_note(note);
        }
        builder.build()
    }

    /// Element type of the entity the field points at.
    fn target_type(&self, field: &Field) -> ElementType {
        if let Some(rewritten) = rewrite_type(field) {
            return rewritten;
        }
        match field.tag.as_str() {
            "581" => return ElementType::Place,
            "582" => return ElementType::Time,
            "555" | "580" | "585" | "750" | "987" => return ElementType::Concept,
            "240" | "740" | "830" | "963" => return ElementType::Work,
            tag if is_linking_entry(tag) => return ElementType::Work,
            _ => {}
        }
        match heading_element_type(field) {
            Some(ElementType::Concept) => {
                let term = trim_name(&field.join_subfields(&['a']));
                self.indexer()
                    .resolve_element_type(&term, &TERM_TYPES)
                    .unwrap_or(ElementType::Concept)
            }
            Some(element_type) => element_type,
            None => ElementType::Concept,
        }
    }

    /// Relator values, or the per-tag default name.
    fn names(&self, record: &MarcRecord, field: &Field) -> Vec<String> {
        let relators = self.relators(field, relator_code(&field.tag));
        if !relators.is_empty() {
            return relators;
        }
        vec![self.default_name(record, field).to_string()]
    }

    fn relators(&self, field: &Field, code: char) -> Vec<String> {
        field
            .subfields_by_code(code)
            .map(trim_name)
            .filter(|name| !name.is_empty())
            .collect()
    }

    fn default_name(&self, record: &MarcRecord, field: &Field) -> &'static str {
        if self.is_authority() {
            return "Related";
        }
        match field.tag.as_str() {
            "100" | "110" | "111" => {
                let responsibility = record.get_subfields("245", &['c']).join(" ");
                if record.leader.is_monograph() && !EDITOR.is_match(&responsibility) {
                    "Author"
                } else {
                    "Related"
                }
            }
            "240" => "Uniform Title",
            "655" => "Genre/Form",
            "830" => "Series",
            "963" => "Related Collection",
            tag if matches!(tag_number(tag), 600..=653) => "Subject",
            tag if is_linking_entry(tag) => linking_entry_relator(tag, field.indicator2),
            _ => "Related",
        }
    }

    /// When the relationship held: `$7`/`$9`, or for linking entries the
    /// year in `$d`.
    fn relationship_time(&self, field: &Field) -> Result<Option<TimeOrDurationRef>> {
        let start = field.get_subfield('7');
        let end = field.get_subfield('9');
        if start.is_some() || end.is_some() {
            return self.parser.dates().parse_span(start, end).map(Some);
        }
        if !is_linking_entry(&field.tag) {
            return Ok(None);
        }
        match field.get_subfield('d').and_then(first_year) {
            Some(year) => self.parser.dates().parse(year, DateContext::General).map(Some),
            None => Ok(None),
        }
    }

    /// 787 sometimes carries the linked record's date in `$g` and other
    /// details in `$d`. Swap them when the stored date of the linked
    /// record is the `$g` year, or unknown.
    fn swap_787_dates<'f>(&self, field: &'f Field) -> Cow<'f, Field> {
        if field.tag != "787" || !field.has_subfield('g') {
            return Cow::Borrowed(field);
        }
        let Some(linked) = link_code(&field.tag)
            .and_then(|code| field.get_subfield(code))
            .map(str::trim)
            .filter(|cn| self.config().is_local_control_number(cn))
        else {
            return Cow::Borrowed(field);
        };
        let g_year = field.get_subfield('g').and_then(first_year);
        let swap = match self.indexer().stored_date(linked) {
            Some(stored) => g_year.is_some() && first_year(stored) == g_year,
            None => true,
        };
        if !swap {
            return Cow::Borrowed(field);
        }
        let mut swapped = field.clone();
        for sf in swapped.subfields.iter_mut() {
            sf.code = match sf.code {
                'g' => 'd',
                'd' => 'g',
                other => other,
            };
        }
        Cow::Owned(swapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::UNVERIFIED;
    use crate::leader::Leader;
    use crate::xobis::Record;
    use crate::{Indexer, TransformConfig, Transformer};

    fn work(fields: Vec<Field>) -> MarcRecord {
        let mut record = MarcRecord::builder(Leader::bibliographic('a', 'm'))
            .control_field("001", "1")
            .build();
        for field in fields {
            record.add_field(field);
        }
        record
    }

    fn transform(record: &MarcRecord) -> Record {
        let indexer = Indexer::new();
        let config = TransformConfig::default();
        Transformer::new(&indexer, &config).transform(record).unwrap()
    }

    #[test]
    fn test_main_entry_author() {
        let record = work(vec![
            Field::from_pairs("100", '1', ' ', &[('a', "Smith, John.")]),
            Field::from_pairs("245", '1', '0', &[('a', "Anatomy /"), ('c', "by John Smith.")]),
        ]);
        let xobis = transform(&record);
        assert_eq!(xobis.relationships.len(), 1);
        let author = &xobis.relationships[0];
        assert_eq!(author.name.text, "Author");
        assert!(author.degree.is_none());
        assert!(author.enumeration.is_some());
        assert_eq!(author.target.element_type(), ElementType::Being);
    }

    #[test]
    fn test_main_entry_editor_is_related() {
        let record = work(vec![
            Field::from_pairs("100", '1', ' ', &[('a', "Smith, John.")]),
            Field::from_pairs("245", '1', '0', &[('a', "Anatomy /"), ('c', "Smith, editor.")]),
        ]);
        let xobis = transform(&record);
        assert_eq!(xobis.relationships[0].name.text, "Related");
    }

    #[test]
    fn test_subject_degree_and_default_name() {
        let record = work(vec![
            Field::from_pairs("245", '0', '0', &[('a', "Anatomy")]),
            Field::from_pairs("650", '1', '2', &[('a', "Heart.")]),
            Field::from_pairs("655", '4', '7', &[('a', "Textbooks")]),
        ]);
        let xobis = transform(&record);
        assert_eq!(xobis.relationships.len(), 1);
        let subject = &xobis.relationships[0];
        assert_eq!(subject.name.text, "Subject");
        assert_eq!(subject.degree, Some(Degree::Primary));
        assert_eq!(subject.target.href(), Some(UNVERIFIED));
    }

    #[test]
    fn test_name_title_added_entry_gives_two_relationships() {
        let record = work(vec![
            Field::from_pairs("245", '0', '0', &[('a', "Collected papers")]),
            Field::from_pairs(
                "700",
                '1',
                '2',
                &[('i', "Contains"), ('a', "Osler, William,"), ('t', "Aequanimitas.")],
            ),
        ]);
        let xobis = transform(&record);
        assert_eq!(xobis.relationships.len(), 2);
        assert_eq!(xobis.relationships[0].name.text, "Contains");
        assert_eq!(xobis.relationships[0].target.element_type(), ElementType::Work);
        assert_eq!(xobis.relationships[1].name.text, "Author");
        assert_eq!(xobis.relationships[1].target.element_type(), ElementType::Being);
    }

    #[test]
    fn test_series_enumeration() {
        let field = Field::from_pairs("830", ' ', '0', &[('a', "Methods in enzymology ;"), ('v', "v. 012")]);
        assert_eq!(enumeration(RecordKind::Bibliographic, &field).as_deref(), Some("12"));
        let field = Field::from_pairs("830", ' ', '0', &[('a', "Methods in enzymology")]);
        assert!(enumeration(RecordKind::Bibliographic, &field).is_none());
    }

    #[test]
    fn test_linking_entry_relator_and_year() {
        let record = work(vec![
            Field::from_pairs("245", '0', '0', &[('a', "Journal of anatomy")]),
            Field::from_pairs(
                "780",
                '0',
                '0',
                &[('t', "Journal of anatomy and physiology"), ('d', "London : Macmillan, 1866")],
            ),
        ]);
        let xobis = transform(&record);
        let preceding = &xobis.relationships[0];
        assert_eq!(preceding.name.text, "Continues");
        assert!(preceding.time.is_some());
        assert_eq!(preceding.target.element_type(), ElementType::Work);
    }

    #[test]
    fn test_rewritten_date_relationships() {
        let mut record = work(vec![
            Field::from_pairs("245", '0', '0', &[('a', "Anatomy")]),
            Field::new("943", ' ', ' '),
        ]);
        record.add_control_field("008", "900101p19901985xxu");
        let xobis = transform(&record);
        let names: Vec<&str> = xobis.relationships.iter().map(|r| r.name.text.as_str()).collect();
        assert_eq!(names, vec!["Distributed", "Produced"]);
        assert!(xobis.relationships.iter().all(|r| r.degree.is_none()));
        assert!(xobis
            .relationships
            .iter()
            .all(|r| r.target.element_type() == ElementType::Time));
    }

    #[test]
    fn test_787_swap_without_stored_date() {
        let indexer = Indexer::new();
        let config = TransformConfig::default();
        let parser = crate::name_parser::NameParser::new(&indexer, &config);
        let context = RecordTransform {
            element_type: ElementType::Work,
            kind: RecordKind::Bibliographic,
            id: None,
            parser,
            diagnostics: Vec::new(),
        };
        let field = Field::from_pairs(
            "787",
            '0',
            '8',
            &[('t', "Atlas"), ('d', "Boston"), ('g', "1901"), ('w', "(CStL)L77")],
        );
        let swapped = context.swap_787_dates(&field);
        assert_eq!(swapped.get_subfield('d'), Some("1901"));
        assert_eq!(swapped.get_subfield('g'), Some("Boston"));

        let field = Field::from_pairs("787", '0', '8', &[('t', "Atlas"), ('g', "1901"), ('w', "(OCoLC)1")]);
        assert_eq!(context.swap_787_dates(&field).get_subfield('g'), Some("1901"));
    }
}
