//! Entry content shared by several principal elements: single and
//! multi-part names, the plain name-plus-qualifiers content and the
//! prequalified content of Events and Organizations.

use crate::error::{Result, XobisError};
use crate::xml::Element;
use crate::xobis::common::NameContent;
use crate::xobis::principal::EntryContent;
use crate::xobis::refs::Ref;

/// A name-part vocabulary.
pub trait PartType: Copy + PartialEq + std::fmt::Debug {
    /// Literal `type` attribute of a `<part>`.
    fn as_str(&self) -> &'static str;

    /// Whether this is the untyped "generic" marker.
    fn is_generic(&self) -> bool;
}

/// One typed part of a multi-part name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePart<P> {
    /// Part type
    pub part_type: P,
    /// Part text
    pub content: NameContent,
}

impl<P> NamePart<P> {
    /// Create a name part.
    pub fn new(part_type: P, content: NameContent) -> Self {
        NamePart { part_type, content }
    }
}

/// A name: either one plain name or a sequence of typed parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Name<P> {
    /// A single untyped name
    Plain(NameContent),
    /// Typed parts in order
    Parts(Vec<NamePart<P>>),
}

impl<P: PartType> Name<P> {
    /// Build a name from parts.
    ///
    /// A single part tagged generic collapses to [`Name::Plain`]; any other
    /// list stays a sequence of parts.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] for an empty list.
    pub fn from_parts(mut parts: Vec<NamePart<P>>) -> Result<Self> {
        match parts.len() {
            0 => Err(XobisError::Invariant("name has no parts".into())),
            1 if parts[0].part_type.is_generic() => Ok(Name::Plain(parts.remove(0).content)),
            _ => Ok(Name::Parts(parts)),
        }
    }

    /// Part types in order; empty for a plain name.
    #[must_use]
    pub fn part_types(&self) -> Vec<P> {
        match self {
            Name::Plain(_) => Vec::new(),
            Name::Parts(parts) => parts.iter().map(|p| p.part_type).collect(),
        }
    }

    /// Display text: the plain name or the parts joined by spaces.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Name::Plain(name) => name.text.clone(),
            Name::Parts(parts) => parts
                .iter()
                .map(|p| p.content.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Render as `<name>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            Name::Plain(name) => name.to_element("name"),
            Name::Parts(parts) => {
                let mut element = Element::new("name");
                for part in parts {
                    let mut child = Element::new("part");
                    if !part.part_type.is_generic() {
                        child.set_attr("type", part.part_type.as_str());
                    }
                    part.content.write_into(&mut child);
                    element.push(child);
                }
                element
            }
        }
    }
}

/// Write a `<qualifiers>` wrapper when there are qualifiers.
pub fn push_qualifiers(entry: &mut Element, qualifiers: &[Ref]) {
    entry.push_list("qualifiers", qualifiers.iter().map(Ref::to_element).collect());
}

/// A name followed by optional qualifiers.
///
/// Entry content of Concepts, Languages, Objects, Places and Strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedContent {
    /// Name
    pub name: NameContent,
    /// Qualifiers
    pub qualifiers: Vec<Ref>,
}

impl NamedContent {
    /// Content with no qualifiers.
    pub fn new(name: NameContent) -> Self {
        NamedContent {
            name,
            qualifiers: Vec::new(),
        }
    }
}

impl EntryContent for NamedContent {
    fn write_entry(&self, entry: &mut Element) {
        entry.push(self.name.to_element("name"));
        push_qualifiers(entry, &self.qualifiers);
    }
}

/// Prequalifiers, a name and qualifiers.
///
/// Entry content of Events and Organizations. Prequalifiers are restricted
/// to Event, Organization and Place refs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrequalifiedContent {
    /// Prequalifiers
    pub prequalifiers: Vec<Ref>,
    /// Name
    pub name: NameContent,
    /// Qualifiers
    pub qualifiers: Vec<Ref>,
}

impl PrequalifiedContent {
    /// Create prequalified content.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] if a prequalifier is not an Event,
    /// Organization or Place ref.
    pub fn new(prequalifiers: Vec<Ref>, name: NameContent, qualifiers: Vec<Ref>) -> Result<Self> {
        if let Some(bad) = prequalifiers
            .iter()
            .find(|r| !r.element_type().can_prequalify())
        {
            return Err(XobisError::Structural(format!(
                "prequalifier must be an event, organization or place, got {}",
                bad.element_type()
            )));
        }
        Ok(PrequalifiedContent {
            prequalifiers,
            name,
            qualifiers,
        })
    }
}

impl EntryContent for PrequalifiedContent {
    fn write_entry(&self, entry: &mut Element) {
        entry.push_list(
            "prequalifiers",
            self.prequalifiers.iter().map(Ref::to_element).collect(),
        );
        entry.push(self.name.to_element("name"));
        push_qualifiers(entry, &self.qualifiers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::refs::ElementRef;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Part {
        Generic,
        Sub,
    }

    impl PartType for Part {
        fn as_str(&self) -> &'static str {
            match self {
                Part::Generic => "generic",
                Part::Sub => "subtitle",
            }
        }

        fn is_generic(&self) -> bool {
            *self == Part::Generic
        }
    }

    #[test]
    fn test_single_generic_collapses() {
        let name = Name::from_parts(vec![NamePart::new(Part::Generic, NameContent::new("X"))]).unwrap();
        assert_eq!(name, Name::Plain(NameContent::new("X")));
    }

    #[test]
    fn test_single_typed_part_stays() {
        let name = Name::from_parts(vec![NamePart::new(Part::Sub, NameContent::new("X"))]).unwrap();
        assert_eq!(name.part_types(), vec![Part::Sub]);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Name::<Part>::from_parts(Vec::new()).is_err());
    }

    #[test]
    fn test_parts_element() {
        let name = Name::from_parts(vec![
            NamePart::new(Part::Generic, NameContent::new("Main")),
            NamePart::new(Part::Sub, NameContent::new("a subtitle")),
        ])
        .unwrap();
        let element = name.to_element();
        let parts = element.children_named("part");
        assert_eq!(parts[0].attr("type"), None);
        assert_eq!(parts[1].attr("type"), Some("subtitle"));
        assert_eq!(name.text(), "Main a subtitle");
    }

    #[test]
    fn test_prequalifier_kinds() {
        let place = Ref::Place(ElementRef::new(NamedContent::new(NameContent::new("Paris"))));
        let concept = Ref::Concept(ElementRef::new(NamedContent::new(NameContent::new("Art"))));
        assert!(PrequalifiedContent::new(vec![place], NameContent::new("Expo"), Vec::new()).is_ok());
        let err = PrequalifiedContent::new(vec![concept], NameContent::new("Expo"), Vec::new());
        assert!(matches!(err, Err(XobisError::Structural(_))));
    }
}
