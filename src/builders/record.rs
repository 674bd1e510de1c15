//! XOBIS record builder.

use crate::error::{Result, XobisError};
use crate::xobis::{
    Action, ControlData, GenericType, IdContent, PrincipalElement, Record, Relationship,
    TimeOrDurationRef,
};

/// Builds a [`Record`]: control data, one principal element and
/// relationships.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    lang: Option<String>,
    id: Option<IdContent>,
    alternates: Vec<IdContent>,
    types: Vec<GenericType>,
    actions: Vec<Action>,
    element: Option<PrincipalElement>,
    relationships: Vec<Relationship>,
}

impl RecordBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record language.
    pub fn set_lang(&mut self, lang: impl Into<String>) -> &mut Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the record identifier.
    pub fn set_id(&mut self, id: IdContent) -> &mut Self {
        self.id = Some(id);
        self
    }

    /// Add an alternate identifier.
    pub fn add_alternate(&mut self, id: IdContent) -> &mut Self {
        self.alternates.push(id);
        self
    }

    /// Add a record type (subset).
    pub fn add_type(&mut self, record_type: GenericType) -> &mut Self {
        self.types.push(record_type);
        self
    }

    /// Add an action.
    pub fn add_action(&mut self, action_type: GenericType, time: TimeOrDurationRef) -> &mut Self {
        self.actions.push(Action { action_type, time });
        self
    }

    /// Set the principal element.
    pub fn set_principal_element(&mut self, element: PrincipalElement) -> &mut Self {
        self.element = Some(element);
        self
    }

    /// Add a relationship.
    pub fn add_relationship(&mut self, relationship: Relationship) -> &mut Self {
        self.relationships.push(relationship);
        self
    }

    /// Build the record.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] without a language or identifier and
    /// [`XobisError::Structural`] without a principal element.
    pub fn build(self) -> Result<Record> {
        let lang = self
            .lang
            .ok_or_else(|| XobisError::Invariant("record has no language".into()))?;
        let id = self
            .id
            .ok_or_else(|| XobisError::Invariant("record has no identifier".into()))?;
        let element = self
            .element
            .ok_or_else(|| XobisError::Structural("record has no principal element".into()))?;
        let mut control_data = ControlData::new(id);
        control_data.alternates = self.alternates;
        control_data.types = self.types;
        control_data.actions = self.actions;
        Record::new(lang, control_data, element, self.relationships)
    }
}
