//! Holdings builder.

use crate::error::{Result, XobisError};
use crate::xobis::{Holdings, HoldingsEntry, Note, Ref, Summary, TimeOrDurationRef};

/// Builds a [`Holdings`] element.
#[derive(Debug, Clone, Default)]
pub struct HoldingsBuilder {
    target: Option<Ref>,
    concept: Option<Ref>,
    qualifiers: Vec<Ref>,
    summary: Summary,
    notes: Vec<Note>,
}

impl HoldingsBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the held Work or Object.
    pub fn set_target(&mut self, target: Ref) -> &mut Self {
        self.target = Some(target);
        self
    }

    /// Set the holdings concept (physical, digital or component).
    pub fn set_concept(&mut self, concept: Ref) -> &mut Self {
        self.concept = Some(concept);
        self
    }

    /// Add a qualifier.
    pub fn add_qualifier(&mut self, qualifier: Ref) -> &mut Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Set the summary enumeration.
    pub fn set_enumeration(&mut self, enumeration: impl Into<String>) -> &mut Self {
        self.summary.enumeration = Some(enumeration.into());
        self
    }

    /// Set the summary chronology.
    pub fn set_chronology(&mut self, chronology: TimeOrDurationRef) -> &mut Self {
        self.summary.chronology = Some(chronology);
        self
    }

    /// Add a note.
    pub fn add_note(&mut self, note: Note) -> &mut Self {
        self.notes.push(note);
        self
    }

    /// Build the holdings.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] without a target or concept, or
    /// when either has the wrong element type.
    pub fn build(self) -> Result<Holdings> {
        let target = self
            .target
            .ok_or_else(|| XobisError::Structural("holdings have no target".into()))?;
        let concept = self
            .concept
            .ok_or_else(|| XobisError::Structural("holdings have no concept".into()))?;
        Ok(Holdings {
            entry: HoldingsEntry::new(target, concept, self.qualifiers)?,
            summary: (!self.summary.is_empty()).then_some(self.summary),
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::EntryBuilder;
    use crate::element_type::ElementType;
    use crate::xobis::NameContent;

    fn simple(element_type: ElementType, text: &str) -> Ref {
        let mut entry = EntryBuilder::new(element_type);
        entry.add_name(NameContent::new(text), None).unwrap();
        entry.build_ref(None).unwrap()
    }

    #[test]
    fn test_build_holdings() {
        let mut builder = HoldingsBuilder::new();
        builder
            .set_target(simple(ElementType::Work, "The Lancet"))
            .set_concept(simple(ElementType::Concept, "Physical Holdings"))
            .set_enumeration("v.1-20");
        let holdings = builder.build().unwrap();
        assert_eq!(
            holdings.summary.and_then(|s| s.enumeration).as_deref(),
            Some("v.1-20")
        );
    }

    #[test]
    fn test_empty_summary_dropped() {
        let mut builder = HoldingsBuilder::new();
        builder
            .set_target(simple(ElementType::Object, "Skeleton"))
            .set_concept(simple(ElementType::Concept, "Physical Holdings"));
        assert!(builder.build().unwrap().summary.is_none());
    }

    #[test]
    fn test_wrong_target() {
        let mut builder = HoldingsBuilder::new();
        builder
            .set_target(simple(ElementType::Place, "Paris"))
            .set_concept(simple(ElementType::Concept, "Physical Holdings"));
        assert!(matches!(builder.build(), Err(XobisError::Structural(_))));
        assert!(HoldingsBuilder::new().build().is_err());
    }
}
