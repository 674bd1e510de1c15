//! Holdings: a library's copy of a Work or Object.
//!
//! ```text
//! holdings = <holdings> <entry> (work|object) concept qualifiers? </entry>
//!              summary? notes? </holdings>
//! ```

use crate::error::{Result, XobisError};
use crate::element_type::ElementType;
use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::entry::push_qualifiers;
use crate::xobis::refs::Ref;
use crate::xobis::time::TimeOrDurationRef;

/// Enumeration and chronology of held issues.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    /// Enumeration text, e.g. "v.1-20"
    pub enumeration: Option<String>,
    /// Chronology
    pub chronology: Option<TimeOrDurationRef>,
}

impl Summary {
    /// Whether the summary has any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enumeration.is_none() && self.chronology.is_none()
    }

    /// Render as `<summary>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("summary");
        if let Some(enumeration) = &self.enumeration {
            element.push(Element::text_element("enumeration", enumeration.as_str()));
        }
        if let Some(chronology) = &self.chronology {
            element.push(Element::new("chronology").with_child(chronology.to_element()));
        }
        element
    }
}

/// Entry of a Holdings element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingsEntry {
    /// The held Work or Object
    pub target: Ref,
    /// Physical, digital or component concept
    pub concept: Ref,
    /// Qualifiers, e.g. location
    pub qualifiers: Vec<Ref>,
}

impl HoldingsEntry {
    /// Create a holdings entry.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] unless `target` is a Work or Object
    /// ref and `concept` a Concept ref.
    pub fn new(target: Ref, concept: Ref, qualifiers: Vec<Ref>) -> Result<Self> {
        if !matches!(target.element_type(), ElementType::Work | ElementType::Object) {
            return Err(XobisError::Structural(format!(
                "holdings must point to a work or object, got {}",
                target.element_type()
            )));
        }
        if concept.element_type() != ElementType::Concept {
            return Err(XobisError::Structural(format!(
                "holdings concept must be a concept, got {}",
                concept.element_type()
            )));
        }
        Ok(HoldingsEntry {
            target,
            concept,
            qualifiers,
        })
    }
}

/// The Holdings element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holdings {
    /// Entry
    pub entry: HoldingsEntry,
    /// Summary
    pub summary: Option<Summary>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Holdings {
    /// Render as `<holdings>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("holdings");
        let mut entry = Element::new("entry");
        entry.push(self.entry.target.to_element());
        entry.push(self.entry.concept.to_element());
        push_qualifiers(&mut entry, &self.entry.qualifiers);
        element.push(entry);
        if let Some(summary) = self.summary.as_ref().filter(|s| !s.is_empty()) {
            element.push(summary.to_element());
        }
        push_notes(&mut element, &self.notes);
        element
    }
}
