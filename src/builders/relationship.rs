//! Relationship builder.

use crate::builders::entry::EntryBuilder;
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::xobis::{
    Degree, LinkAttributes, NameContent, Note, Ref, Relationship, RelationshipName,
    RelationshipType, TimeOrDurationRef,
};

/// Builds one [`Relationship`].
///
/// # Examples
///
/// ```ignore
/// let mut builder = RelationshipBuilder::new();
/// builder
///     .set_name("Author", None)
///     .set_enumeration("1")?
///     .set_target(target);
/// let relationship = builder.build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationshipBuilder {
    name: Option<RelationshipName>,
    relationship_type: Option<RelationshipType>,
    degree: Option<Degree>,
    enumeration: Option<Ref>,
    time: Option<TimeOrDurationRef>,
    target: Option<Ref>,
    notes: Vec<Note>,
}

impl RelationshipBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name and its link.
    pub fn set_name(&mut self, text: impl Into<String>, link: Option<LinkAttributes>) -> &mut Self {
        let mut name = RelationshipName::new(text);
        name.link = link;
        self.name = Some(name);
        self
    }

    /// Set the language of the name.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] if no name was set.
    pub fn set_name_lang(&mut self, lang: impl Into<String>) -> Result<&mut Self> {
        let name = self
            .name
            .as_mut()
            .ok_or_else(|| XobisError::Structural("relationship language set before its name".into()))?;
        name.lang = Some(lang.into());
        Ok(self)
    }

    /// Set the type.
    pub fn set_type(&mut self, relationship_type: Option<RelationshipType>) -> &mut Self {
        self.relationship_type = relationship_type;
        self
    }

    /// Set the degree.
    pub fn set_degree(&mut self, degree: Option<Degree>) -> &mut Self {
        self.degree = degree;
        self
    }

    /// Set the enumeration, an unlinked String ref.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] for blank text.
    pub fn set_enumeration(&mut self, text: &str) -> Result<&mut Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(XobisError::Invariant("relationship enumeration is blank".into()));
        }
        let mut entry = EntryBuilder::new(ElementType::String);
        entry.add_name(NameContent::new(text), None)?;
        self.enumeration = Some(entry.build_ref(None)?);
        Ok(self)
    }

    /// Set when the relationship held.
    pub fn set_time(&mut self, time: Option<TimeOrDurationRef>) -> &mut Self {
        self.time = time;
        self
    }

    /// Set the target.
    pub fn set_target(&mut self, target: Ref) -> &mut Self {
        self.target = Some(target);
        self
    }

    /// Add a note.
    pub fn add_note(&mut self, note: Note) -> &mut Self {
        self.notes.push(note);
        self
    }

    /// Build the relationship.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] without a name or a target.
    pub fn build(self) -> Result<Relationship> {
        let name = self
            .name
            .ok_or_else(|| XobisError::Structural("relationship has no name".into()))?;
        let target = self
            .target
            .ok_or_else(|| XobisError::Structural("relationship has no target".into()))?;
        let mut relationship = Relationship::new(
            name,
            self.relationship_type,
            self.degree,
            self.enumeration,
            self.time,
            target,
        )?;
        relationship.notes = self.notes;
        Ok(relationship)
    }
}
