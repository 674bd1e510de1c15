//! The Object principal element and the version list it shares with Work.

use crate::xml::Element;
use crate::xobis::common::{push_notes, GenericType, LinkAttributes, NameContent, Note, Role};
use crate::xobis::entry::NamedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::time::TimeOrDurationRef;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of an Object.
    ObjectType, "object type" {
        Natural => "natural",
        Crafted => "crafted",
        Manufactured => "manufactured",
    }
}

xobis_vocabulary! {
    /// Class of an Object.
    ObjectClass, "object class" {
        Individual => "individual",
        Collective => "collective",
    }
}

/// One version of an Object or Work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Version type
    pub version_type: Option<GenericType>,
    /// When the version applies
    pub time: Option<TimeOrDurationRef>,
    /// Version name, e.g. an edition statement
    pub name: NameContent,
    /// Notes
    pub notes: Vec<Note>,
}

impl Version {
    /// A version with only a name.
    pub fn new(name: NameContent) -> Self {
        Version {
            version_type: None,
            time: None,
            name,
            notes: Vec::new(),
        }
    }

    /// Render as `<version>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("version");
        if let Some(version_type) = &self.version_type {
            element.push(version_type.to_element());
        }
        if let Some(time) = &self.time {
            element.push(time.to_element());
        }
        element.push(self.name.to_element("name"));
        push_notes(&mut element, &self.notes);
        element
    }
}

/// Write a `<versions>` wrapper when there are versions.
pub fn push_versions(parent: &mut Element, versions: &[Version]) {
    parent.push_list("versions", versions.iter().map(Version::to_element).collect());
}

/// The Object principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    /// Role
    pub role: Option<Role>,
    /// Type
    pub object_type: Option<ObjectType>,
    /// Class
    pub class: Option<ObjectClass>,
    /// Main entry
    pub entry: MainEntry<NamedContent>,
    /// Versions
    pub versions: Vec<Version>,
    /// Links to holdings records
    pub holdings: Vec<LinkAttributes>,
    /// Variants
    pub variants: Vec<Variant<NamedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Object {
    /// Render as `<object>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("object");
        element.set_opt_attr("role", self.role.map(|r| r.as_str()));
        element.set_opt_attr("type", self.object_type.map(|t| t.as_str()));
        element.set_opt_attr("class", self.class.map(|c| c.as_str()));
        element.push(self.entry.to_element());
        push_versions(&mut element, &self.versions);
        element.push_list(
            "holdings",
            self.holdings.iter().map(|h| h.to_element("ref")).collect(),
        );
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}
