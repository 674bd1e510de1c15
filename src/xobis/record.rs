//! XOBIS records, control data and relationships.
//!
//! ```text
//! record = <record lang> controlData principal relationships? </record>
//! ```

use crate::error::{Result, XobisError};
use crate::element_type::ElementType;
use crate::xml::{self, Element, XLINK_NS, XOBIS_NS};
use crate::xobis::common::{push_notes, GenericType, IdContent, LinkAttributes, Note};
use crate::xobis::principal::PrincipalElement;
use crate::xobis::refs::Ref;
use crate::xobis::time::TimeOrDurationRef;

xobis_vocabulary! {
    /// Type of a relationship.
    RelationshipType, "relationship type" {
        Subordinate => "subordinate",
        Superordinate => "superordinate",
        Preordinate => "preordinate",
        Postordinate => "postordinate",
        Associative => "associative",
        Dissociative => "dissociative",
    }
}

xobis_vocabulary! {
    /// Degree of a relationship.
    Degree, "relationship degree" {
        Primary => "primary",
        Secondary => "secondary",
        Tertiary => "tertiary",
        Broad => "broad",
    }
}

/// An action taken on a record, e.g. created or revised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Action type
    pub action_type: GenericType,
    /// When
    pub time: TimeOrDurationRef,
}

impl Action {
    /// Render as `<action>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::new("action")
            .with_child(self.action_type.to_element())
            .with_child(self.time.to_element())
    }
}

/// Record-level identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlData {
    /// The record's own identifier
    pub id: IdContent,
    /// Other identifiers
    pub alternates: Vec<IdContent>,
    /// Record types (subsets)
    pub types: Vec<GenericType>,
    /// Actions
    pub actions: Vec<Action>,
}

impl ControlData {
    /// Control data with only an identifier.
    pub fn new(id: IdContent) -> Self {
        ControlData {
            id,
            alternates: Vec::new(),
            types: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Render as `<controlData>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("controlData");
        element.push(self.id.to_element());
        element.push_list(
            "alternates",
            self.alternates.iter().map(IdContent::to_element).collect(),
        );
        element.push_list("types", self.types.iter().map(GenericType::to_element).collect());
        element.push_list("actions", self.actions.iter().map(Action::to_element).collect());
        element
    }
}

/// Name of a relationship: free text with an optional link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipName {
    /// Text
    pub text: String,
    /// Language
    pub lang: Option<String>,
    /// Link to the relationship's Concept record
    pub link: Option<LinkAttributes>,
}

impl RelationshipName {
    /// An unlinked name.
    pub fn new(text: impl Into<String>) -> Self {
        RelationshipName {
            text: text.into(),
            lang: None,
            link: None,
        }
    }

    fn to_element(&self) -> Element {
        let mut element = Element::new("name");
        element.set_opt_attr("lang", self.lang.as_ref());
        if let Some(link) = &self.link {
            link.write_into(&mut element);
        }
        element.push_text(self.text.as_str());
        element
    }
}

/// A typed link from a record to another entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Name
    pub name: RelationshipName,
    /// Type
    pub relationship_type: Option<RelationshipType>,
    /// Degree
    pub degree: Option<Degree>,
    /// Enumeration, a String ref
    pub enumeration: Option<Ref>,
    /// When the relationship held
    pub time: Option<TimeOrDurationRef>,
    /// Target
    pub target: Ref,
    /// Notes
    pub notes: Vec<Note>,
}

impl Relationship {
    /// Create a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] if the enumeration is not a String ref.
    pub fn new(
        name: RelationshipName,
        relationship_type: Option<RelationshipType>,
        degree: Option<Degree>,
        enumeration: Option<Ref>,
        time: Option<TimeOrDurationRef>,
        target: Ref,
    ) -> Result<Self> {
        if let Some(enumeration) = &enumeration {
            if enumeration.element_type() != ElementType::String {
                return Err(XobisError::Structural(format!(
                    "relationship enumeration must be a string ref, got {}",
                    enumeration.element_type()
                )));
            }
        }
        Ok(Relationship {
            name,
            relationship_type,
            degree,
            enumeration,
            time,
            target,
            notes: Vec::new(),
        })
    }

    /// Render as `<relationship>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("relationship");
        element.set_opt_attr("type", self.relationship_type.map(|t| t.as_str()));
        element.set_opt_attr("degree", self.degree.map(|d| d.as_str()));
        element.push(self.name.to_element());
        if let Some(enumeration) = &self.enumeration {
            element.push(Element::new("enumeration").with_child(enumeration.to_element()));
        }
        if let Some(time) = &self.time {
            element.push(time.to_element());
        }
        element.push(self.target.to_element());
        push_notes(&mut element, &self.notes);
        element
    }
}

/// A complete XOBIS record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Language of the record
    pub lang: String,
    /// Control data
    pub control_data: ControlData,
    /// The principal element
    pub element: PrincipalElement,
    /// Outgoing relationships
    pub relationships: Vec<Relationship>,
}

impl Record {
    /// Assemble a record.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] if `lang` is empty.
    pub fn new(
        lang: impl Into<String>,
        control_data: ControlData,
        element: PrincipalElement,
        relationships: Vec<Relationship>,
    ) -> Result<Self> {
        let lang = lang.into();
        if lang.trim().is_empty() {
            return Err(XobisError::Invariant("record language is empty".into()));
        }
        Ok(Record {
            lang,
            control_data,
            element,
            relationships,
        })
    }

    /// Element type of the principal element.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element.element_type()
    }

    /// Render as the namespaced `<record>` root.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("record")
            .with_attr("xmlns", XOBIS_NS)
            .with_attr("xmlns:xlink", XLINK_NS)
            .with_attr("lang", self.lang.as_str());
        element.push(self.control_data.to_element());
        element.push(self.element.to_element());
        element.push_list(
            "relationships",
            self.relationships.iter().map(Relationship::to_element).collect(),
        );
        element
    }

    /// Serialize as a complete XML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML writer fails.
    pub fn to_xml_string(&self) -> Result<String> {
        xml::document_to_string(&self.to_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::common::{IdDescription, IdStatus, IdStatusKind, NameContent};
    use crate::xobis::concept::Concept;
    use crate::xobis::entry::NamedContent;
    use crate::xobis::principal::MainEntry;
    use crate::xobis::refs::ElementRef;

    fn concept_record(relationships: Vec<Relationship>) -> Record {
        let id = IdContent::new(
            Some(IdStatus::plain(IdStatusKind::Valid)),
            vec![IdDescription::Text("Lane Medical Library".into())],
            "(CStL)Z1",
        )
        .unwrap();
        let concept = Concept::new(
            None,
            None,
            None,
            MainEntry::new(NamedContent::new(NameContent::new("Anatomy"))),
            Vec::new(),
            Vec::new(),
        )
        .unwrap();
        Record::new(
            "eng",
            ControlData::new(id),
            PrincipalElement::Concept(concept),
            relationships,
        )
        .unwrap()
    }

    fn string_ref(value: &str) -> Ref {
        Ref::String(ElementRef::new(NamedContent::new(NameContent::new(value))))
    }

    #[test]
    fn test_record_requires_language() {
        let record = concept_record(Vec::new());
        let result = Record::new("", record.control_data, record.element, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_record_document() {
        let target = Ref::Concept(ElementRef::new(NamedContent::new(NameContent::new("Body"))));
        let relationship = Relationship::new(
            RelationshipName::new("Broader"),
            Some(RelationshipType::Superordinate),
            Some(Degree::Primary),
            Some(string_ref("1")),
            None,
            target,
        )
        .unwrap();
        let record = concept_record(vec![relationship]);
        let text = record.to_xml_string().unwrap();
        assert!(text.contains(r#"<record xmlns="http://www.xobis.info/ns/2.0/" xmlns:xlink="https://www.w3.org/1999/xlink" lang="eng">"#));
        assert!(text.contains(r#"<relationship type="superordinate" degree="primary">"#));
        assert!(text.contains("<value>(CStL)Z1</value>"));

        let element = record.to_element();
        let order: Vec<&str> = element.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["controlData", "concept", "relationships"]);
    }

    #[test]
    fn test_enumeration_must_be_string() {
        let target = Ref::Concept(ElementRef::new(NamedContent::new(NameContent::new("Body"))));
        let bad = Ref::Concept(ElementRef::new(NamedContent::new(NameContent::new("1"))));
        let result = Relationship::new(RelationshipName::new("Related"), None, None, Some(bad), None, target);
        assert!(matches!(result, Err(XobisError::Structural(_))));
    }
}
