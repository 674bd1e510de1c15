//! Principal elements and their main entries.

use crate::element_type::ElementType;
use crate::xml::Element;
use crate::xobis::being::Being;
use crate::xobis::common::EntryGroupAttributes;
use crate::xobis::concept::Concept;
use crate::xobis::event::Event;
use crate::xobis::holdings::Holdings;
use crate::xobis::language::Language;
use crate::xobis::object::Object;
use crate::xobis::organization::Organization;
use crate::xobis::place::Place;
use crate::xobis::string::StringElement;
use crate::xobis::time::Time;
use crate::xobis::work::Work;

/// Content that fills an `<entry>` element.
///
/// Implemented once per principal element; the same content type serves the
/// main entry, variant entries and refs of that element.
pub trait EntryContent {
    /// Write attributes and children onto an `<entry>` element.
    fn write_entry(&self, entry: &mut Element);
}

/// The main entry of a principal element: `<entry id? group? preferred? scheme?>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainEntry<C> {
    /// Entry group attributes
    pub group: EntryGroupAttributes,
    /// Scheme
    pub scheme: Option<String>,
    /// Content
    pub content: C,
}

impl<C: EntryContent> MainEntry<C> {
    /// A main entry with only content.
    pub fn new(content: C) -> Self {
        MainEntry {
            group: EntryGroupAttributes::default(),
            scheme: None,
            content,
        }
    }

    /// Render as `<entry>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut entry = Element::new("entry");
        self.group.write_into(&mut entry);
        entry.set_opt_attr("scheme", self.scheme.as_ref());
        self.content.write_entry(&mut entry);
        entry
    }
}

/// Exactly one principal element per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalElement {
    /// Being
    Being(Being),
    /// Concept
    Concept(Concept),
    /// Event
    Event(Event),
    /// Language
    Language(Language),
    /// Object
    Object(Object),
    /// Organization
    Organization(Organization),
    /// Place
    Place(Place),
    /// String
    String(StringElement),
    /// Time
    Time(Time),
    /// Work
    Work(Work),
    /// Holdings
    Holdings(Holdings),
}

impl PrincipalElement {
    /// Element type of this principal.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            PrincipalElement::Being(_) => ElementType::Being,
            PrincipalElement::Concept(_) => ElementType::Concept,
            PrincipalElement::Event(_) => ElementType::Event,
            PrincipalElement::Language(_) => ElementType::Language,
            PrincipalElement::Object(_) => ElementType::Object,
            PrincipalElement::Organization(_) => ElementType::Organization,
            PrincipalElement::Place(_) => ElementType::Place,
            PrincipalElement::String(_) => ElementType::String,
            PrincipalElement::Time(_) => ElementType::Time,
            PrincipalElement::Work(_) => ElementType::Work,
            PrincipalElement::Holdings(_) => ElementType::Holdings,
        }
    }

    /// Render the principal element.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            PrincipalElement::Being(e) => e.to_element(),
            PrincipalElement::Concept(e) => e.to_element(),
            PrincipalElement::Event(e) => e.to_element(),
            PrincipalElement::Language(e) => e.to_element(),
            PrincipalElement::Object(e) => e.to_element(),
            PrincipalElement::Organization(e) => e.to_element(),
            PrincipalElement::Place(e) => e.to_element(),
            PrincipalElement::String(e) => e.to_element(),
            PrincipalElement::Time(e) => e.to_element(),
            PrincipalElement::Work(e) => e.to_element(),
            PrincipalElement::Holdings(e) => e.to_element(),
        }
    }
}
