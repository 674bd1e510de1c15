//! Variant entries: alternative forms of a principal element's entry.

use crate::element_type::ElementType;
use crate::xml::Element;
use crate::xobis::being::BeingContent;
use crate::xobis::common::{push_notes, EntryGroupAttributes, GenericType, Includes, Note, Substitute};
use crate::xobis::entry::{NamedContent, PrequalifiedContent};
use crate::xobis::principal::EntryContent;
use crate::xobis::time::{TimeContent, TimeOrDurationRef};
use crate::xobis::work::WorkContent;

/// A variant of some entry content `C`.
///
/// ```text
/// <variant id? group? preferred? includes?>
///   type? (time|duration)? <entry scheme? substitute?> C </entry> notes?
/// </variant>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant<C> {
    /// Entry group attributes
    pub group: EntryGroupAttributes,
    /// Sumption marker (concept-family variants only)
    pub includes: Option<Includes>,
    /// Variant type
    pub variant_type: Option<GenericType>,
    /// When the variant applied
    pub time: Option<TimeOrDurationRef>,
    /// Entry scheme
    pub scheme: Option<String>,
    /// Entry substitute
    pub substitute: Option<Substitute>,
    /// Entry content
    pub content: C,
    /// Notes
    pub notes: Vec<Note>,
}

impl<C: EntryContent> Variant<C> {
    /// A variant with only content.
    pub fn new(content: C) -> Self {
        Variant {
            group: EntryGroupAttributes::default(),
            includes: None,
            variant_type: None,
            time: None,
            scheme: None,
            substitute: None,
            content,
            notes: Vec::new(),
        }
    }

    /// Render as `<variant>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("variant");
        self.group.write_into(&mut element);
        element.set_opt_attr("includes", self.includes.map(|i| i.as_str()));
        if let Some(variant_type) = &self.variant_type {
            element.push(variant_type.to_element());
        }
        if let Some(time) = &self.time {
            element.push(time.to_element());
        }
        let mut entry = Element::new("entry");
        entry.set_opt_attr("scheme", self.scheme.as_ref());
        entry.set_opt_attr("substitute", self.substitute.map(|s| s.as_str()));
        self.content.write_entry(&mut entry);
        element.push(entry);
        push_notes(&mut element, &self.notes);
        element
    }
}

/// A variant of any principal element, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantEntry {
    /// Being variant
    Being(Variant<BeingContent>),
    /// Concept variant
    Concept(Variant<NamedContent>),
    /// Event variant
    Event(Variant<PrequalifiedContent>),
    /// Language variant
    Language(Variant<NamedContent>),
    /// Object variant
    Object(Variant<NamedContent>),
    /// Organization variant
    Organization(Variant<PrequalifiedContent>),
    /// Place variant
    Place(Variant<NamedContent>),
    /// String variant
    String(Variant<NamedContent>),
    /// Time variant
    Time(Variant<TimeContent>),
    /// Work variant
    Work(Variant<WorkContent>),
}

impl VariantEntry {
    /// The principal element this variant belongs to.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            VariantEntry::Being(_) => ElementType::Being,
            VariantEntry::Concept(_) => ElementType::Concept,
            VariantEntry::Event(_) => ElementType::Event,
            VariantEntry::Language(_) => ElementType::Language,
            VariantEntry::Object(_) => ElementType::Object,
            VariantEntry::Organization(_) => ElementType::Organization,
            VariantEntry::Place(_) => ElementType::Place,
            VariantEntry::String(_) => ElementType::String,
            VariantEntry::Time(_) => ElementType::Time,
            VariantEntry::Work(_) => ElementType::Work,
        }
    }

    /// Render as `<variant>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            VariantEntry::Being(v) => v.to_element(),
            VariantEntry::Concept(v)
            | VariantEntry::Language(v)
            | VariantEntry::Object(v)
            | VariantEntry::Place(v)
            | VariantEntry::String(v) => v.to_element(),
            VariantEntry::Event(v) | VariantEntry::Organization(v) => v.to_element(),
            VariantEntry::Time(v) => v.to_element(),
            VariantEntry::Work(v) => v.to_element(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::common::NameContent;

    #[test]
    fn test_variant_element_order() {
        let mut variant = Variant::new(NamedContent::new(NameContent::new("Heart diseases")));
        variant.includes = Some(Includes::Narrower);
        variant.variant_type = Some(GenericType::titled("Equivalent"));
        variant.substitute = Some(Substitute::Abbrev);
        variant.group.group = Some("1".into());

        let element = variant.to_element();
        assert_eq!(element.attr("includes"), Some("narrower"));
        assert_eq!(element.attr("group"), Some("1"));
        let names: Vec<&str> = element.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["type", "entry"]);
        let entry = element.child("entry").unwrap();
        assert_eq!(entry.attr("substitute"), Some("abbrev"));
        assert_eq!(entry.child("name").unwrap().text(), "Heart diseases");
    }

    #[test]
    fn test_variant_entry_kind() {
        let variant = VariantEntry::Place(Variant::new(NamedContent::new(NameContent::new("Paree"))));
        assert_eq!(variant.element_type(), ElementType::Place);
    }
}
