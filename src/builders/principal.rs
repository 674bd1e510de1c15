//! Principal element builder.
//!
//! Attribute setters take the literal attribute value, validate it against
//! the element's vocabulary and fail fast: an attribute the element does not
//! carry is a structural error, a value outside the vocabulary an invariant
//! error.

use crate::builders::entry::{disallowed, EntryBuilder};
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::xobis::{
    Being, BeingClass, BeingType, Concept, ConceptSubtype, ConceptType, EntryGroupAttributes,
    Event, EventType, Language, LanguageType, LinkAttributes, MainEntry, Note, Object, ObjectClass,
    ObjectType, Organization, OrganizationType, Place, PlaceType, PrincipalElement, Role,
    StringClass, StringElement, StringType, Time, Usage, Variant, VariantEntry, Version, Work,
    WorkClass, WorkType,
};

/// Builds a [`PrincipalElement`] of any kind except Holdings.
#[derive(Debug, Clone)]
pub struct PrincipalElementBuilder {
    entry: EntryBuilder,
    group: EntryGroupAttributes,
    scheme: Option<String>,
    element_kind: Option<String>,
    class: Option<String>,
    usage: Option<String>,
    subtype: Option<String>,
    role: Option<String>,
    variants: Vec<VariantEntry>,
    notes: Vec<Note>,
    versions: Vec<Version>,
    holdings: Vec<LinkAttributes>,
    parts_of_speech: Vec<LinkAttributes>,
}

impl PrincipalElementBuilder {
    /// A builder for one element type.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] for Holdings, which have their own
    /// builder.
    pub fn new(element_type: ElementType) -> Result<Self> {
        if element_type == ElementType::Holdings {
            return Err(XobisError::Structural(
                "holdings are built with HoldingsBuilder".into(),
            ));
        }
        Ok(PrincipalElementBuilder {
            entry: EntryBuilder::new(element_type),
            group: EntryGroupAttributes::default(),
            scheme: None,
            element_kind: None,
            class: None,
            usage: None,
            subtype: None,
            role: None,
            variants: Vec::new(),
            notes: Vec::new(),
            versions: Vec::new(),
            holdings: Vec::new(),
            parts_of_speech: Vec::new(),
        })
    }

    /// The element type being built.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.entry.element_type()
    }

    /// The main entry being built.
    pub fn entry_mut(&mut self) -> &mut EntryBuilder {
        &mut self.entry
    }

    fn allow(&self, allowed: &[ElementType], what: &str) -> Result<()> {
        if allowed.contains(&self.element_type()) {
            Ok(())
        } else {
            Err(disallowed(self.element_type(), what))
        }
    }

    /// Set the `type` attribute.
    ///
    /// # Errors
    ///
    /// Time elements have no type; other elements validate the value.
    pub fn set_type(&mut self, value: &str) -> Result<&mut Self> {
        match self.element_type() {
            ElementType::Being => {
                BeingType::parse(value)?;
            }
            ElementType::Concept => {
                ConceptType::parse(value)?;
            }
            ElementType::Event => {
                EventType::parse(value)?;
            }
            ElementType::Language => {
                LanguageType::parse(value)?;
            }
            ElementType::Object => {
                ObjectType::parse(value)?;
            }
            ElementType::Organization => {
                OrganizationType::parse(value)?;
            }
            ElementType::Place => {
                PlaceType::parse(value)?;
            }
            ElementType::String => {
                StringType::parse(value)?;
            }
            ElementType::Work => {
                WorkType::parse(value)?;
            }
            other => return Err(disallowed(other, "a type")),
        }
        self.element_kind = Some(value.to_string());
        Ok(self)
    }

    /// Set the `class` attribute.
    ///
    /// # Errors
    ///
    /// Only Beings, Objects, Strings and Works have a class.
    pub fn set_class(&mut self, value: &str) -> Result<&mut Self> {
        match self.element_type() {
            ElementType::Being => {
                BeingClass::parse(value)?;
            }
            ElementType::Object => {
                ObjectClass::parse(value)?;
            }
            ElementType::String => {
                StringClass::parse(value)?;
            }
            ElementType::Work => {
                WorkClass::parse(value)?;
            }
            other => return Err(disallowed(other, "a class")),
        }
        self.class = Some(value.to_string());
        Ok(self)
    }

    /// Set the `usage` attribute.
    ///
    /// # Errors
    ///
    /// Only Concepts, Languages and Places have a usage.
    pub fn set_usage(&mut self, value: &str) -> Result<&mut Self> {
        self.allow(
            &[ElementType::Concept, ElementType::Language, ElementType::Place],
            "a usage",
        )?;
        Usage::parse(value)?;
        self.usage = Some(value.to_string());
        Ok(self)
    }

    /// Set the Concept `subtype` attribute.
    ///
    /// # Errors
    ///
    /// Only Concepts have a subtype.
    pub fn set_subtype(&mut self, value: &str) -> Result<&mut Self> {
        self.allow(&[ElementType::Concept], "a subtype")?;
        ConceptSubtype::parse(value)?;
        self.subtype = Some(value.to_string());
        Ok(self)
    }

    /// Set the `role` attribute.
    ///
    /// # Errors
    ///
    /// Only Objects and Works have a role.
    pub fn set_role(&mut self, value: &str) -> Result<&mut Self> {
        self.allow(&[ElementType::Object, ElementType::Work], "a role")?;
        Role::parse(value)?;
        self.role = Some(value.to_string());
        Ok(self)
    }

    /// Set the main entry scheme.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the main entry id/group/preferred attributes.
    pub fn set_entry_group(&mut self, group: EntryGroupAttributes) -> &mut Self {
        self.group = group;
        self
    }

    /// Add a variant.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] if the variant is of another
    /// element type.
    pub fn add_variant(&mut self, variant: VariantEntry) -> Result<&mut Self> {
        if variant.element_type() != self.element_type() {
            return Err(XobisError::Structural(format!(
                "{} variant added to a {}",
                variant.element_type(),
                self.element_type()
            )));
        }
        self.variants.push(variant);
        Ok(self)
    }

    /// Add a note.
    pub fn add_note(&mut self, note: Note) -> &mut Self {
        self.notes.push(note);
        self
    }

    /// Add notes.
    pub fn add_notes(&mut self, notes: impl IntoIterator<Item = Note>) -> &mut Self {
        self.notes.extend(notes);
        self
    }

    /// Add a version.
    ///
    /// # Errors
    ///
    /// Only Objects and Works have versions.
    pub fn add_version(&mut self, version: Version) -> Result<&mut Self> {
        self.allow(&[ElementType::Object, ElementType::Work], "versions")?;
        self.versions.push(version);
        Ok(self)
    }

    /// Add a link to a holdings record.
    ///
    /// # Errors
    ///
    /// Only Objects list their holdings.
    pub fn add_holdings(&mut self, holdings: LinkAttributes) -> Result<&mut Self> {
        self.allow(&[ElementType::Object], "holdings")?;
        self.holdings.push(holdings);
        Ok(self)
    }

    /// Add a part-of-speech link.
    ///
    /// # Errors
    ///
    /// Only Strings have parts of speech.
    pub fn add_part_of_speech(&mut self, pos: LinkAttributes) -> Result<&mut Self> {
        self.allow(&[ElementType::String], "parts of speech")?;
        self.parts_of_speech.push(pos);
        Ok(self)
    }

    /// Build the element.
    ///
    /// # Errors
    ///
    /// Fails when the entry or a variant cannot be built, or when the
    /// assembled element violates an invariant.
    pub fn build(self) -> Result<PrincipalElement> {
        let PrincipalElementBuilder {
            entry,
            group,
            scheme,
            element_kind,
            class,
            usage,
            subtype,
            role,
            variants,
            notes,
            versions,
            holdings,
            parts_of_speech,
        } = self;
        let element_type = entry.element_type();

        macro_rules! vocab {
            ($value:expr, $vocab:ty) => {
                $value.as_deref().map(<$vocab>::parse).transpose()?
            };
        }
        macro_rules! main_entry {
            ($content:expr) => {
                MainEntry {
                    group,
                    scheme,
                    content: $content,
                }
            };
        }
        macro_rules! variants_of {
            ($kind:ident) => {
                variants
                    .into_iter()
                    .map(|variant| match variant {
                        VariantEntry::$kind(v) => Ok(v),
                        other => Err(XobisError::Structural(format!(
                            "{} variant in a {}",
                            other.element_type(),
                            element_type
                        ))),
                    })
                    .collect::<Result<Vec<Variant<_>>>>()?
            };
        }

        Ok(match element_type {
            ElementType::Being => PrincipalElement::Being(Being::new(
                vocab!(element_kind, BeingType),
                vocab!(class, BeingClass),
                main_entry!(entry.build_being()?),
                variants_of!(Being),
                notes,
            )?),
            ElementType::Concept => PrincipalElement::Concept(Concept::new(
                vocab!(element_kind, ConceptType),
                vocab!(usage, Usage),
                vocab!(subtype, ConceptSubtype),
                main_entry!(entry.build_named()?),
                variants_of!(Concept),
                notes,
            )?),
            ElementType::Event => PrincipalElement::Event(Event {
                event_type: vocab!(element_kind, EventType),
                entry: main_entry!(entry.build_prequalified()?),
                variants: variants_of!(Event),
                notes,
            }),
            ElementType::Language => PrincipalElement::Language(Language {
                language_type: vocab!(element_kind, LanguageType),
                usage: vocab!(usage, Usage),
                entry: main_entry!(entry.build_named()?),
                variants: variants_of!(Language),
                notes,
            }),
            ElementType::Object => PrincipalElement::Object(Object {
                role: vocab!(role, Role),
                object_type: vocab!(element_kind, ObjectType),
                class: vocab!(class, ObjectClass),
                entry: main_entry!(entry.build_named()?),
                versions,
                holdings,
                variants: variants_of!(Object),
                notes,
            }),
            ElementType::Organization => PrincipalElement::Organization(Organization {
                organization_type: vocab!(element_kind, OrganizationType),
                entry: main_entry!(entry.build_prequalified()?),
                variants: variants_of!(Organization),
                notes,
            }),
            ElementType::Place => PrincipalElement::Place(Place {
                place_type: vocab!(element_kind, PlaceType),
                usage: vocab!(usage, Usage),
                entry: main_entry!(entry.build_named()?),
                variants: variants_of!(Place),
                notes,
            }),
            ElementType::String => PrincipalElement::String(StringElement {
                string_type: vocab!(element_kind, StringType),
                class: vocab!(class, StringClass),
                entry: main_entry!(entry.build_named()?),
                parts_of_speech,
                variants: variants_of!(String),
                notes,
            }),
            ElementType::Time => PrincipalElement::Time(Time {
                entry: main_entry!(entry.build_time()?),
                variants: variants_of!(Time),
                notes,
            }),
            ElementType::Work => PrincipalElement::Work(Work {
                role: vocab!(role, Role),
                work_type: vocab!(element_kind, WorkType),
                class: vocab!(class, WorkClass),
                entry: main_entry!(entry.build_work()?),
                versions,
                variants: variants_of!(Work),
                notes,
            }),
            ElementType::Holdings => {
                return Err(XobisError::Structural(
                    "holdings are built with HoldingsBuilder".into(),
                ));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::VariantBuilder;
    use crate::xobis::NameContent;

    fn concept_builder(name: &str) -> PrincipalElementBuilder {
        let mut builder = PrincipalElementBuilder::new(ElementType::Concept).unwrap();
        builder.entry_mut().add_name(NameContent::new(name), None).unwrap();
        builder
    }

    #[test]
    fn test_attribute_matrix() {
        let mut concept = concept_builder("Anatomy");
        assert!(concept.set_usage("subdivision").is_ok());
        assert!(concept.set_subtype("topical").is_ok());
        assert!(matches!(concept.set_class("word"), Err(XobisError::Structural(_))));
        assert!(matches!(concept.set_role("instance"), Err(XobisError::Structural(_))));

        let mut being = PrincipalElementBuilder::new(ElementType::Being).unwrap();
        assert!(matches!(being.set_usage("subdivision"), Err(XobisError::Structural(_))));
        assert!(matches!(being.set_type("robot"), Err(XobisError::Invariant(_))));
        assert!(being.set_type("human").is_ok());

        let mut time = PrincipalElementBuilder::new(ElementType::Time).unwrap();
        assert!(matches!(time.set_type("anything"), Err(XobisError::Structural(_))));
    }

    #[test]
    fn test_holdings_rejected() {
        assert!(matches!(
            PrincipalElementBuilder::new(ElementType::Holdings),
            Err(XobisError::Structural(_))
        ));
    }

    #[test]
    fn test_build_concept_with_variant() {
        let mut builder = concept_builder("Anatomy");
        builder.set_type("abstract").unwrap();
        let mut variant = VariantBuilder::new(ElementType::Concept);
        variant.entry_mut().add_name(NameContent::new("Body structure"), None).unwrap();
        builder.add_variant(variant.build().unwrap()).unwrap();

        let PrincipalElement::Concept(concept) = builder.build().unwrap() else {
            panic!("expected a concept");
        };
        assert_eq!(concept.concept_type, Some(ConceptType::Abstract));
        assert_eq!(concept.variants.len(), 1);
    }

    #[test]
    fn test_variant_kind_mismatch() {
        let mut builder = concept_builder("Anatomy");
        let mut variant = VariantBuilder::new(ElementType::Place);
        variant.entry_mut().add_name(NameContent::new("Paris"), None).unwrap();
        assert!(matches!(
            builder.add_variant(variant.build().unwrap()),
            Err(XobisError::Structural(_))
        ));
    }

    #[test]
    fn test_usage_without_subtype_fails_on_build() {
        let mut builder = concept_builder("Anatomy");
        builder.set_usage("subdivision").unwrap();
        assert!(matches!(builder.build(), Err(XobisError::Invariant(_))));
    }

    #[test]
    fn test_versions_holdings_and_parts_of_speech() {
        let mut object = PrincipalElementBuilder::new(ElementType::Object).unwrap();
        object.entry_mut().add_name(NameContent::new("Microscope"), None).unwrap();
        object.add_version(Version::new(NameContent::new("2nd model"))).unwrap();
        object
            .add_holdings(LinkAttributes::new("Stacks copy", Some("(CStL)H1".to_string())))
            .unwrap();
        assert!(matches!(
            object.add_part_of_speech(LinkAttributes::new("noun", None)),
            Err(XobisError::Structural(_))
        ));
        let PrincipalElement::Object(built) = object.build().unwrap() else {
            panic!("expected an object");
        };
        assert_eq!(built.versions.len(), 1);
        assert_eq!(built.holdings.len(), 1);

        let mut concept = concept_builder("Anatomy");
        assert!(matches!(
            concept.add_version(Version::new(NameContent::new("Rev. ed."))),
            Err(XobisError::Structural(_))
        ));
    }
}
