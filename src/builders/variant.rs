//! Variant entry builder.

use crate::builders::entry::{disallowed, EntryBuilder};
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::xobis::{
    EntryGroupAttributes, GenericType, Includes, Note, Substitute, TimeOrDurationRef, Variant,
    VariantEntry,
};

/// Builds one [`VariantEntry`] of a given element type.
#[derive(Debug, Clone)]
pub struct VariantBuilder {
    entry: EntryBuilder,
    group: EntryGroupAttributes,
    includes: Option<Includes>,
    variant_type: Option<GenericType>,
    time: Option<TimeOrDurationRef>,
    scheme: Option<String>,
    substitute: Option<Substitute>,
    notes: Vec<Note>,
}

impl VariantBuilder {
    /// An empty variant.
    #[must_use]
    pub fn new(element_type: ElementType) -> Self {
        VariantBuilder {
            entry: EntryBuilder::new(element_type),
            group: EntryGroupAttributes::default(),
            includes: None,
            variant_type: None,
            time: None,
            scheme: None,
            substitute: None,
            notes: Vec::new(),
        }
    }

    /// The element type of the variant.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.entry.element_type()
    }

    /// The entry being built.
    pub fn entry_mut(&mut self) -> &mut EntryBuilder {
        &mut self.entry
    }

    /// Set the id/group/preferred attributes.
    pub fn set_group(&mut self, group: EntryGroupAttributes) -> &mut Self {
        self.group = group;
        self
    }

    /// Mark sumption.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] outside the Concept family.
    pub fn set_includes(&mut self, includes: Includes) -> Result<&mut Self> {
        if !self.element_type().is_concept_family() {
            return Err(disallowed(self.element_type(), "includes"));
        }
        self.includes = Some(includes);
        Ok(self)
    }

    /// Set the variant type.
    pub fn set_type(&mut self, variant_type: GenericType) -> &mut Self {
        self.variant_type = Some(variant_type);
        self
    }

    /// Set when the variant applied.
    pub fn set_time(&mut self, time: TimeOrDurationRef) -> &mut Self {
        self.time = Some(time);
        self
    }

    /// Set the entry scheme.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the entry substitute.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] for a value outside the vocabulary.
    pub fn set_substitute(&mut self, substitute: &str) -> Result<&mut Self> {
        self.substitute = Some(Substitute::parse(substitute)?);
        Ok(self)
    }

    /// Add a note.
    pub fn add_note(&mut self, note: Note) -> &mut Self {
        self.notes.push(note);
        self
    }

    /// Build the variant.
    ///
    /// # Errors
    ///
    /// Fails when the entry cannot be built; see [`EntryBuilder`].
    pub fn build(self) -> Result<VariantEntry> {
        let VariantBuilder {
            entry,
            group,
            includes,
            variant_type,
            time,
            scheme,
            substitute,
            notes,
        } = self;
        macro_rules! wrap {
            ($kind:ident, $content:expr) => {
                VariantEntry::$kind(Variant {
                    group,
                    includes,
                    variant_type,
                    time,
                    scheme,
                    substitute,
                    content: $content,
                    notes,
                })
            };
        }
        Ok(match entry.element_type() {
            ElementType::Being => wrap!(Being, entry.build_being()?),
            ElementType::Concept => wrap!(Concept, entry.build_named()?),
            ElementType::Event => wrap!(Event, entry.build_prequalified()?),
            ElementType::Language => wrap!(Language, entry.build_named()?),
            ElementType::Object => wrap!(Object, entry.build_named()?),
            ElementType::Organization => wrap!(Organization, entry.build_prequalified()?),
            ElementType::Place => wrap!(Place, entry.build_named()?),
            ElementType::String => wrap!(String, entry.build_named()?),
            ElementType::Time => wrap!(Time, entry.build_time()?),
            ElementType::Work => wrap!(Work, entry.build_work()?),
            ElementType::Holdings => {
                return Err(XobisError::Structural("holdings have no variants".into()));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::NameContent;

    #[test]
    fn test_build_concept_variant() {
        let mut builder = VariantBuilder::new(ElementType::Concept);
        builder.entry_mut().add_name(NameContent::new("Bones"), None).unwrap();
        builder.set_includes(Includes::Narrower).unwrap();
        builder.set_substitute("abbrev").unwrap();
        builder.set_type(GenericType::titled("Narrower term"));
        let variant = builder.build().unwrap();
        let VariantEntry::Concept(variant) = variant else {
            panic!("expected a concept variant");
        };
        assert_eq!(variant.includes, Some(Includes::Narrower));
        assert_eq!(variant.content.name.text, "Bones");
    }

    #[test]
    fn test_includes_only_for_concept_family() {
        let mut builder = VariantBuilder::new(ElementType::Being);
        assert!(matches!(
            builder.set_includes(Includes::Broader),
            Err(XobisError::Structural(_))
        ));
    }

    #[test]
    fn test_bad_substitute() {
        let mut builder = VariantBuilder::new(ElementType::Concept);
        assert!(matches!(
            builder.set_substitute("nickname"),
            Err(XobisError::Invariant(_))
        ));
    }

    #[test]
    fn test_missing_name_fails() {
        let builder = VariantBuilder::new(ElementType::Place);
        assert!(builder.build().is_err());
    }
}
