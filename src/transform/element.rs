//! Principal elements: typed attributes, the main entry and holdings.

use super::variants::entry_group;
use super::RecordTransform;
use crate::builders::{build_simple_ref, EntryBuilder, HoldingsBuilder, PrincipalElementBuilder};
use crate::datetime::DateContext;
use crate::element_type::{broad_category, category_is, heading_field, ElementType};
use crate::error::{Result, XobisError};
use crate::leader::RecordKind;
use crate::name_parser::trim_name;
use crate::record::{Field, Record as MarcRecord};
use crate::xobis::{LinkAttributes, NameContent, PrincipalElement, Ref};

const NAME_TYPE: &str = "Name Type";

/// Attribute values for a principal element, as vocabulary strings.
#[derive(Debug, Default, PartialEq, Eq)]
struct Attributes {
    element_kind: Option<&'static str>,
    class: Option<&'static str>,
    usage: Option<&'static str>,
    subtype: Option<&'static str>,
    role: Option<&'static str>,
}

/// Typed attributes by element type, record and heading.
fn attributes(element_type: ElementType, record: &MarcRecord, heading: &Field) -> Attributes {
    let category = broad_category(record);
    let is = |name: &str| category_is(category.as_deref(), name);
    let referential = matches!(record.fixed_field_byte(9), Some('b' | 'c'));
    let authority = record.leader.kind() == RecordKind::Authority;
    let role = Some(if authority { "authority" } else { "instance" });

    match element_type {
        ElementType::Being => Attributes {
            element_kind: Some(if is("Persons, Nonhuman") {
                "nonhuman"
            } else if is("Persons, Fictional") || is("Persons, Legendary") {
                "special"
            } else {
                "human"
            }),
            class: Some(if referential {
                "referential"
            } else if heading.indicator1 == '3' {
                "familial"
            } else if is("Persons, Families or Groups") {
                "collective"
            } else if record.fixed_field_byte(32) == Some('b') {
                "undifferentiated"
            } else {
                "individual"
            }),
            ..Attributes::default()
        },
        ElementType::Concept => {
            let control = ["Relationships", "Subsets", "Note Types", "Action Types", "Time Types"];
            let (usage, subtype) = match heading.tag.as_str() {
                "180" => (Some("subdivision"), Some("general")),
                "185" => (Some("subdivision"), Some("form")),
                _ => (None, None),
            };
            Attributes {
                element_kind: Some(if control.iter().any(|c| is(c)) {
                    "control"
                } else if is("Collections") {
                    "collective"
                } else if heading.tag == "162" {
                    "specific"
                } else {
                    "abstract"
                }),
                usage,
                subtype,
                ..Attributes::default()
            }
        }
        ElementType::Event => Attributes {
            element_kind: Some(if heading.tag.ends_with("11") {
                "meeting"
            } else if is("Events, Natural") {
                "natural"
            } else if is("Events, Journeys") {
                "journey"
            } else {
                "occurrence"
            }),
            ..Attributes::default()
        },
        ElementType::Language => Attributes {
            element_kind: Some(if is("Scripts") {
                "script"
            } else if is("Languages, Constructed") {
                "constructed"
            } else {
                "natural"
            }),
            ..Attributes::default()
        },
        ElementType::Object => Attributes {
            role,
            element_kind: if is("Objects, Natural") {
                Some("natural")
            } else if is("Objects, Crafted") {
                Some("crafted")
            } else if is("Objects, Manufactured") {
                Some("manufactured")
            } else {
                None
            },
            class: Some(if record.leader.bibliographic_level == 'c' && !authority {
                "collective"
            } else {
                "individual"
            }),
            ..Attributes::default()
        },
        ElementType::Organization => Attributes {
            element_kind: Some(if heading.indicator1 == '1' || is("Organizations, Government") {
                "government"
            } else if is("Organizations, Business") {
                "business"
            } else if is("Organizations, Nonprofit") {
                "nonprofit"
            } else {
                "other"
            }),
            ..Attributes::default()
        },
        ElementType::Place => Attributes {
            element_kind: Some(if is("Places, Natural") {
                "natural"
            } else if is("Places, Constructed") {
                "constructed"
            } else {
                "jurisdictional"
            }),
            usage: (heading.tag == "181").then_some("subdivision"),
            ..Attributes::default()
        },
        ElementType::String => {
            let text = trim_name(&heading.join_subfields(&['a']));
            let (element_kind, class) = string_attributes(&text);
            Attributes {
                element_kind: Some(element_kind),
                class: Some(class),
                ..Attributes::default()
            }
        }
        ElementType::Work => Attributes {
            role,
            element_kind: Some(
                if !authority && matches!(record.leader.record_type, 'c' | 'd' | 'g' | 'i' | 'j' | 'k') {
                    "artistic"
                } else {
                    "intellectual"
                },
            ),
            class: Some(match record.leader.bibliographic_level {
                's' if !authority => "serial",
                'c' if !authority => "collective",
                _ if referential => "referential",
                _ => "individual",
            }),
            ..Attributes::default()
        },
        ElementType::Time | ElementType::Holdings => Attributes::default(),
    }
}

/// String type and class from its text.
fn string_attributes(text: &str) -> (&'static str, &'static str) {
    let visible = || text.chars().filter(|c| !c.is_whitespace());
    let string_type = if visible().all(|c| c.is_numeric()) {
        "numeric"
    } else if visible().all(char::is_alphabetic) {
        "textual"
    } else {
        "mixed"
    };
    let class = if text.split_whitespace().count() > 1 {
        "phrase"
    } else {
        "word"
    };
    (string_type, class)
}

impl RecordTransform<'_> {
    /// Build the principal element: attributes, entry, variants and notes.
    pub(super) fn principal_element(&mut self, record: &MarcRecord) -> Result<PrincipalElement> {
        let heading = heading_field(record).ok_or_else(|| {
            XobisError::Structural(format!("{} record has no heading field", self.element_type))
        })?;
        let mut builder = PrincipalElementBuilder::new(self.element_type)?;

        let attributes = attributes(self.element_type, record, heading);
        if let Some(role) = attributes.role {
            builder.set_role(role)?;
        }
        if let Some(element_kind) = attributes.element_kind {
            builder.set_type(element_kind)?;
        }
        if let Some(class) = attributes.class {
            builder.set_class(class)?;
        }
        if let Some(usage) = attributes.usage {
            builder.set_usage(usage)?;
        }
        if let Some(subtype) = attributes.subtype {
            builder.set_subtype(subtype)?;
        }
        if let Some(group) = heading.get_subfield('8') {
            builder.set_entry_group(entry_group(group));
        }

        self.main_entry(heading, builder.entry_mut())?;
        self.variants(record, &mut builder)?;
        let notes = self.notes(record)?;
        builder.add_notes(notes);
        builder.build()
    }

    fn main_entry(&mut self, heading: &Field, entry: &mut EntryBuilder) -> Result<()> {
        let parsed = self.parser.parse(heading, self.element_type);
        self.recover_all(Some(&heading.tag), parsed.warnings)?;
        entry.add_items(parsed.items)?;
        if self.element_type != ElementType::Being {
            return Ok(());
        }

        let start = heading.get_subfield('7');
        let end = heading.get_subfield('9');
        if start.is_some() || end.is_some() {
            match self.parser.dates().parse_span(start, end) {
                Ok(time) => {
                    entry.set_time(time)?;
                }
                Err(err) => self.recover(Some(&heading.tag), err)?,
            }
        }
        if self.is_authority() {
            if let Some(name_type) = heading.get_subfield('e').map(trim_name).filter(|t| !t.is_empty()) {
                entry.set_entry_type(self.generic_type(&name_type, NAME_TYPE)?)?;
            }
        }
        Ok(())
    }

    /// Build a Holdings element from a holdings record.
    pub(super) fn holdings(&mut self, record: &MarcRecord) -> Result<PrincipalElement> {
        let mut builder = HoldingsBuilder::new();
        builder
            .set_target(self.holdings_target(record)?)
            .set_concept(build_simple_ref(holdings_concept(record), ElementType::Concept, self.indexer())?);

        for field in record.fields_by_tag("852") {
            let call_number = field.join_subfields(&['h', 'i']);
            if !call_number.is_empty() {
                builder.add_qualifier(build_simple_ref(&call_number, ElementType::String, self.indexer())?);
            }
        }

        if let Some(field) = record.get_field("863") {
            let enumeration = field.join_subfields(&['a', 'b']);
            if !enumeration.is_empty() {
                builder.set_enumeration(enumeration);
            }
            if let Some(chronology) = field.get_subfield('i') {
                match self.parser.dates().parse(chronology, DateContext::General) {
                    Ok(time) => {
                        builder.set_chronology(time);
                    }
                    Err(err) => self.recover(Some("863"), err)?,
                }
            }
        }

        for note in self.notes(record)? {
            builder.add_note(note);
        }
        builder.build().map(PrincipalElement::Holdings)
    }

    /// The bibliographic record a holdings record belongs to (004).
    fn holdings_target(&self, record: &MarcRecord) -> Result<Ref> {
        let linked = record
            .get_control_field("004")
            .map(str::trim)
            .filter(|linked| !linked.is_empty())
            .ok_or_else(|| XobisError::Invariant("holdings record has no 004".into()))?;
        let control_number = self.config().control_number(RecordKind::Bibliographic, linked);
        let title = self
            .indexer()
            .reverse_lookup(&control_number)
            .map(|subfields| {
                let values: Vec<&str> = subfields.iter().map(|sf| sf.value.trim()).collect();
                trim_name(&values.join(" "))
            })
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| control_number.clone());
        let mut entry = EntryBuilder::new(ElementType::Work);
        entry.add_name(NameContent::new(title.as_str()), None)?;
        entry.build_ref(Some(LinkAttributes::new(title, Some(control_number))))
    }
}

/// Holdings concept by the kind of item held (Leader/06).
fn holdings_concept(record: &MarcRecord) -> &'static str {
    match record.leader.record_type {
        'x' => "Single-part Item Holdings",
        'v' => "Multipart Item Holdings",
        'y' => "Serial Item Holdings",
        _ => "Holdings",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;

    fn authority(heading: Field, category: Option<&str>) -> MarcRecord {
        let mut record = MarcRecord::builder(Leader::authority())
            .control_field("001", "1")
            .field(heading)
            .build();
        if let Some(category) = category {
            record.add_field(Field::from_pairs("655", '4', '7', &[('a', category)]));
        }
        record
    }

    #[test]
    fn test_being_attributes() {
        let heading = Field::from_pairs("100", '1', ' ', &[('a', "Smith, John")]);
        let record = authority(heading.clone(), None);
        let attrs = attributes(ElementType::Being, &record, &heading);
        assert_eq!(attrs.element_kind, Some("human"));
        assert_eq!(attrs.class, Some("individual"));

        let heading = Field::from_pairs("100", '3', ' ', &[('a', "Medici family")]);
        let record = authority(heading.clone(), Some("Persons, Fictional"));
        let attrs = attributes(ElementType::Being, &record, &heading);
        assert_eq!(attrs.element_kind, Some("special"));
        assert_eq!(attrs.class, Some("familial"));
    }

    #[test]
    fn test_concept_subdivisions() {
        let heading = Field::from_pairs("185", ' ', ' ', &[('v', "Atlases")]);
        let record = authority(heading.clone(), None);
        let attrs = attributes(ElementType::Concept, &record, &heading);
        assert_eq!(attrs.usage, Some("subdivision"));
        assert_eq!(attrs.subtype, Some("form"));
        assert_eq!(attrs.element_kind, Some("abstract"));

        let heading = Field::from_pairs("150", ' ', ' ', &[('a', "Author")]);
        let record = authority(heading.clone(), Some("Relationships"));
        assert_eq!(attributes(ElementType::Concept, &record, &heading).element_kind, Some("control"));
    }

    #[test]
    fn test_work_attributes() {
        let heading = Field::from_pairs("245", '0', '0', &[('a', "Lancet")]);
        let record = MarcRecord::builder(Leader::bibliographic('a', 's'))
            .field(heading.clone())
            .build();
        let attrs = attributes(ElementType::Work, &record, &heading);
        assert_eq!(attrs.role, Some("instance"));
        assert_eq!(attrs.element_kind, Some("intellectual"));
        assert_eq!(attrs.class, Some("serial"));
    }

    #[test]
    fn test_string_attributes() {
        assert_eq!(string_attributes("1984"), ("numeric", "word"));
        assert_eq!(string_attributes("Ciao bella"), ("textual", "phrase"));
        assert_eq!(string_attributes("R2-D2"), ("mixed", "word"));
    }
}
