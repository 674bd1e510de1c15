//! The Being principal element: persons, families, groups and other beings.
//!
//! ```text
//! being = <being type? class?>
//!           <entry ...> type? (time|duration)? name qualifiers? </entry>
//!           variants? notes?
//!         </being>
//! ```
//!
//! Name parts come from one of two disjoint surname vocabularies
//! (`surname`/`patronym`/`matronym`/`teknonym` or `paternal surname`/
//! `maternal surname`) plus the common `given` and `suffix`. A record's
//! entry and variants must all draw on the same vocabulary.

use crate::error::{Result, XobisError};
use crate::xml::Element;
use crate::xobis::common::{push_notes, GenericType, Note};
use crate::xobis::entry::{push_qualifiers, Name, PartType};
use crate::xobis::principal::{EntryContent, MainEntry};
use crate::xobis::refs::Ref;
use crate::xobis::time::TimeOrDurationRef;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a Being.
    BeingType, "being type" {
        Human => "human",
        Nonhuman => "nonhuman",
        Special => "special",
    }
}

xobis_vocabulary! {
    /// Class of a Being.
    BeingClass, "being class" {
        Individual => "individual",
        Familial => "familial",
        Collective => "collective",
        Undifferentiated => "undifferentiated",
        Referential => "referential",
    }
}

xobis_vocabulary! {
    /// Type of a Being name part.
    BeingPart, "being name part" {
        Given => "given",
        Suffix => "suffix",
        Surname => "surname",
        Patronym => "patronym",
        Matronym => "matronym",
        Teknonym => "teknonym",
        PaternalSurname => "paternal surname",
        MaternalSurname => "maternal surname",
        Generic => "generic",
    }
}

/// Which surname vocabulary a part belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartFamily {
    /// Usable with either vocabulary
    Common,
    /// surname, patronym, matronym, teknonym
    Surname,
    /// paternal surname, maternal surname
    PaternalMaternal,
}

impl BeingPart {
    /// Vocabulary of this part.
    #[must_use]
    pub fn family(&self) -> PartFamily {
        match self {
            BeingPart::Surname | BeingPart::Patronym | BeingPart::Matronym | BeingPart::Teknonym => {
                PartFamily::Surname
            }
            BeingPart::PaternalSurname | BeingPart::MaternalSurname => PartFamily::PaternalMaternal,
            BeingPart::Given | BeingPart::Suffix | BeingPart::Generic => PartFamily::Common,
        }
    }
}

impl PartType for BeingPart {
    fn as_str(&self) -> &'static str {
        BeingPart::as_str(self)
    }

    fn is_generic(&self) -> bool {
        *self == BeingPart::Generic
    }
}

/// Entry content of a Being: optional type and time, name, qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeingContent {
    /// Entry type, e.g. "Pseudonym"
    pub entry_type: Option<GenericType>,
    /// Lifespan or period of activity
    pub time: Option<TimeOrDurationRef>,
    /// Name
    pub name: Name<BeingPart>,
    /// Qualifiers
    pub qualifiers: Vec<Ref>,
}

impl BeingContent {
    /// Content with only a name.
    pub fn new(name: Name<BeingPart>) -> Self {
        BeingContent {
            entry_type: None,
            time: None,
            name,
            qualifiers: Vec::new(),
        }
    }
}

impl EntryContent for BeingContent {
    fn write_entry(&self, entry: &mut Element) {
        if let Some(entry_type) = &self.entry_type {
            entry.push(entry_type.to_element());
        }
        if let Some(time) = &self.time {
            entry.push(time.to_element());
        }
        entry.push(self.name.to_element());
        push_qualifiers(entry, &self.qualifiers);
    }
}

/// The Being principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Being {
    /// Type
    pub being_type: Option<BeingType>,
    /// Class
    pub class: Option<BeingClass>,
    /// Main entry
    pub entry: MainEntry<BeingContent>,
    /// Variants
    pub variants: Vec<Variant<BeingContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Being {
    /// Assemble a Being.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] if the entry and variants mix the
    /// two surname vocabularies.
    pub fn new(
        being_type: Option<BeingType>,
        class: Option<BeingClass>,
        entry: MainEntry<BeingContent>,
        variants: Vec<Variant<BeingContent>>,
        notes: Vec<Note>,
    ) -> Result<Self> {
        let mut family = PartFamily::Common;
        let names = std::iter::once(&entry.content.name).chain(variants.iter().map(|v| &v.content.name));
        for part in names.flat_map(Name::part_types) {
            match (family, part.family()) {
                (_, PartFamily::Common) => {}
                (PartFamily::Common, found) => family = found,
                (current, found) if current != found => {
                    return Err(XobisError::Invariant(format!(
                        "being names mix surname vocabularies ({part} with {current:?})"
                    )));
                }
                _ => {}
            }
        }
        Ok(Being {
            being_type,
            class,
            entry,
            variants,
            notes,
        })
    }

    /// Render as `<being>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("being");
        element.set_opt_attr("type", self.being_type.map(|t| t.as_str()));
        element.set_opt_attr("class", self.class.map(|c| c.as_str()));
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::common::NameContent;
    use crate::xobis::entry::NamePart;

    fn name(parts: &[(BeingPart, &str)]) -> Name<BeingPart> {
        Name::from_parts(
            parts
                .iter()
                .map(|(t, s)| NamePart::new(*t, NameContent::new(*s)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_being_element() {
        let entry = MainEntry::new(BeingContent::new(name(&[
            (BeingPart::Surname, "Smith"),
            (BeingPart::Given, "John"),
        ])));
        let being = Being::new(
            Some(BeingType::Human),
            Some(BeingClass::Individual),
            entry,
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        let element = being.to_element();
        assert_eq!(element.attr("type"), Some("human"));
        assert_eq!(element.attr("class"), Some("individual"));
        let parts = element.path(&["entry", "name"]).unwrap().children_named("part");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].attr("type"), Some("surname"));
        assert_eq!(parts[1].text(), "John");
    }

    #[test]
    fn test_mixed_surname_vocabularies_rejected() {
        let entry = MainEntry::new(BeingContent::new(name(&[
            (BeingPart::PaternalSurname, "García"),
            (BeingPart::Given, "Ana"),
        ])));
        let variant = Variant::new(BeingContent::new(name(&[(BeingPart::Surname, "Garcia")])));
        let result = Being::new(None, None, entry, vec![variant], Vec::new());
        assert!(matches!(result, Err(XobisError::Invariant(_))));
    }

    #[test]
    fn test_type_and_class_vocabularies() {
        assert!(BeingType::parse("alien").is_err());
        assert_eq!(BeingClass::parse("familial").unwrap(), BeingClass::Familial);
        assert_eq!(BeingPart::parse("maternal surname").unwrap(), BeingPart::MaternalSurname);
    }
}
