//! Refs: reduced principal elements embedded in other records as link
//! targets, qualifiers, prequalifiers and note sources.
//!
//! A ref carries the target's control number in its `xlink:href` rather
//! than a pointer to the target, so object graphs never form cycles.

use crate::element_type::ElementType;
use crate::xml::Element;
use crate::xobis::being::BeingContent;
use crate::xobis::common::LinkAttributes;
use crate::xobis::entry::{NamedContent, PrequalifiedContent};
use crate::xobis::principal::EntryContent;
use crate::xobis::time::{DurationRef, TimeOrDurationRef, TimeRef};
use crate::xobis::work::WorkContent;

/// `<kind LinkAttributes?><entry> C </entry></kind>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef<C> {
    /// Title and href of the target
    pub link: Option<LinkAttributes>,
    /// Entry content
    pub content: C,
}

impl<C: EntryContent> ElementRef<C> {
    /// A ref without link attributes.
    pub fn new(content: C) -> Self {
        ElementRef {
            link: None,
            content,
        }
    }

    /// A ref with link attributes.
    pub fn linked(content: C, link: LinkAttributes) -> Self {
        ElementRef {
            link: Some(link),
            content,
        }
    }

    fn to_element(&self, kind: &str) -> Element {
        let mut element = Element::new(kind);
        if let Some(link) = &self.link {
            link.write_into(&mut element);
        }
        let mut entry = Element::new("entry");
        self.content.write_entry(&mut entry);
        element.push(entry);
        element
    }
}

/// A ref to any principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ref {
    /// Being ref
    Being(ElementRef<BeingContent>),
    /// Concept ref
    Concept(ElementRef<NamedContent>),
    /// Event ref
    Event(ElementRef<PrequalifiedContent>),
    /// Language ref
    Language(ElementRef<NamedContent>),
    /// Object ref
    Object(ElementRef<NamedContent>),
    /// Organization ref
    Organization(ElementRef<PrequalifiedContent>),
    /// Place ref
    Place(ElementRef<NamedContent>),
    /// String ref
    String(ElementRef<NamedContent>),
    /// Time instance ref
    Time(TimeRef),
    /// Time duration ref
    Duration(DurationRef),
    /// Work ref
    Work(ElementRef<WorkContent>),
}

impl Ref {
    /// Element type of the target.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Ref::Being(_) => ElementType::Being,
            Ref::Concept(_) => ElementType::Concept,
            Ref::Event(_) => ElementType::Event,
            Ref::Language(_) => ElementType::Language,
            Ref::Object(_) => ElementType::Object,
            Ref::Organization(_) => ElementType::Organization,
            Ref::Place(_) => ElementType::Place,
            Ref::String(_) => ElementType::String,
            Ref::Time(_) | Ref::Duration(_) => ElementType::Time,
            Ref::Work(_) => ElementType::Work,
        }
    }

    /// Link attributes of the target.
    #[must_use]
    pub fn link(&self) -> Option<&LinkAttributes> {
        match self {
            Ref::Being(r) => r.link.as_ref(),
            Ref::Concept(r) | Ref::Language(r) | Ref::Object(r) | Ref::Place(r) | Ref::String(r) => {
                r.link.as_ref()
            }
            Ref::Event(r) | Ref::Organization(r) => r.link.as_ref(),
            Ref::Time(r) => r.link.as_ref(),
            Ref::Duration(r) => r.link.as_ref(),
            Ref::Work(r) => r.link.as_ref(),
        }
    }

    /// The target's href, if linked.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.link().and_then(|l| l.href.as_deref())
    }

    /// Render as `<being>`, `<concept>`, ... `<time>`, `<duration>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            Ref::Being(r) => r.to_element("being"),
            Ref::Concept(r) => r.to_element("concept"),
            Ref::Event(r) => r.to_element("event"),
            Ref::Language(r) => r.to_element("language"),
            Ref::Object(r) => r.to_element("object"),
            Ref::Organization(r) => r.to_element("organization"),
            Ref::Place(r) => r.to_element("place"),
            Ref::String(r) => r.to_element("string"),
            Ref::Time(r) => r.to_element(),
            Ref::Duration(r) => r.to_element(),
            Ref::Work(r) => r.to_element("work"),
        }
    }
}

impl From<TimeOrDurationRef> for Ref {
    fn from(value: TimeOrDurationRef) -> Self {
        match value {
            TimeOrDurationRef::Time(t) => Ref::Time(t),
            TimeOrDurationRef::Duration(d) => Ref::Duration(d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::element_to_string;
    use crate::xobis::common::NameContent;

    #[test]
    fn test_concept_ref_element() {
        let reference = Ref::Concept(ElementRef::linked(
            NamedContent::new(NameContent::new("Anatomy")),
            LinkAttributes::new("Anatomy", Some("(CStL)Z1".into())),
        ));
        assert_eq!(
            element_to_string(&reference.to_element()).unwrap(),
            r#"<concept xlink:href="(CStL)Z1" xlink:title="Anatomy"><entry><name>Anatomy</name></entry></concept>"#
        );
        assert_eq!(reference.href(), Some("(CStL)Z1"));
        assert_eq!(reference.element_type(), ElementType::Concept);
    }

    #[test]
    fn test_unlinked_ref() {
        let reference = Ref::Place(ElementRef::new(NamedContent::new(NameContent::new("Paris"))));
        assert!(reference.link().is_none());
        assert_eq!(reference.to_element().name, "place");
    }
}
