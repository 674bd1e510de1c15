//! The Concept principal element.
//!
//! ```text
//! concept = <concept type? (usage subtype)?> <entry ...> name qualifiers? </entry>
//!           variants? notes? </concept>
//! ```

use crate::error::{Result, XobisError};
use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::entry::NamedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a Concept.
    ConceptType, "concept type" {
        Abstract => "abstract",
        Collective => "collective",
        Control => "control",
        Specific => "specific",
    }
}

xobis_vocabulary! {
    /// Subtype of a subdivision Concept.
    ConceptSubtype, "concept subtype" {
        General => "general",
        Form => "form",
        Topical => "topical",
        Unspecified => "unspecified",
    }
}

xobis_vocabulary! {
    /// Usage of a Concept, Language or Place.
    Usage, "usage" {
        Subdivision => "subdivision",
    }
}

/// The Concept principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Type
    pub concept_type: Option<ConceptType>,
    /// Usage; present exactly when `subtype` is
    pub usage: Option<Usage>,
    /// Subtype; present exactly when `usage` is
    pub subtype: Option<ConceptSubtype>,
    /// Main entry
    pub entry: MainEntry<NamedContent>,
    /// Variants
    pub variants: Vec<Variant<NamedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Concept {
    /// Assemble a Concept.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] if only one of usage and subtype is given.
    pub fn new(
        concept_type: Option<ConceptType>,
        usage: Option<Usage>,
        subtype: Option<ConceptSubtype>,
        entry: MainEntry<NamedContent>,
        variants: Vec<Variant<NamedContent>>,
        notes: Vec<Note>,
    ) -> Result<Self> {
        if usage.is_some() != subtype.is_some() {
            return Err(XobisError::Invariant(
                "concept usage and subtype must be given together".into(),
            ));
        }
        Ok(Concept {
            concept_type,
            usage,
            subtype,
            entry,
            variants,
            notes,
        })
    }

    /// Render as `<concept>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("concept");
        element.set_opt_attr("type", self.concept_type.map(|t| t.as_str()));
        element.set_opt_attr("usage", self.usage.map(|u| u.as_str()));
        element.set_opt_attr("subtype", self.subtype.map(|s| s.as_str()));
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

    fn entry() -> MainEntry<NamedContent> {
        MainEntry::new(NamedContent::new(NameContent::new("history")))
    }

    #[test]
    fn test_usage_requires_subtype() {
        let result = Concept::new(None, Some(Usage::Subdivision), None, entry(), Vec::new(), Vec::new());
        assert!(result.is_err());
        let result = Concept::new(None, None, Some(ConceptSubtype::Form), entry(), Vec::new(), Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_subdivision_concept() {
        let concept = Concept::new(
            Some(ConceptType::Abstract),
            Some(Usage::Subdivision),
            Some(ConceptSubtype::General),
            entry(),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        let element = concept.to_element();
        assert_eq!(element.attr("type"), Some("abstract"));
        assert_eq!(element.attr("usage"), Some("subdivision"));
        assert_eq!(element.attr("subtype"), Some("general"));
    }
}
