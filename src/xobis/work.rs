//! The Work principal element: intellectual and artistic works.

use crate::xml::Element;
use crate::xobis::common::{push_notes, Note, Role};
use crate::xobis::entry::{push_qualifiers, Name, PartType};
use crate::xobis::object::{push_versions, Version};
use crate::xobis::principal::{EntryContent, MainEntry};
use crate::xobis::refs::Ref;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a Work.
    WorkType, "work type" {
        Intellectual => "intellectual",
        Artistic => "artistic",
    }
}

xobis_vocabulary! {
    /// Class of a Work.
    WorkClass, "work class" {
        Individual => "individual",
        Serial => "serial",
        Collective => "collective",
        Referential => "referential",
    }
}

xobis_vocabulary! {
    /// Type of a Work title part.
    WorkPart, "work name part" {
        Generic => "generic",
        Subtitle => "subtitle",
        Section => "section",
    }
}

impl PartType for WorkPart {
    fn as_str(&self) -> &'static str {
        WorkPart::as_str(self)
    }

    fn is_generic(&self) -> bool {
        *self == WorkPart::Generic
    }
}

/// Entry content of a Work: title and qualifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkContent {
    /// Title
    pub name: Name<WorkPart>,
    /// Qualifiers
    pub qualifiers: Vec<Ref>,
}

impl WorkContent {
    /// Content with only a title.
    pub fn new(name: Name<WorkPart>) -> Self {
        WorkContent {
            name,
            qualifiers: Vec::new(),
        }
    }
}

impl EntryContent for WorkContent {
    fn write_entry(&self, entry: &mut Element) {
        entry.push(self.name.to_element());
        push_qualifiers(entry, &self.qualifiers);
    }
}

/// The Work principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    /// Role
    pub role: Option<Role>,
    /// Type
    pub work_type: Option<WorkType>,
    /// Class
    pub class: Option<WorkClass>,
    /// Main entry
    pub entry: MainEntry<WorkContent>,
    /// Versions
    pub versions: Vec<Version>,
    /// Variants
    pub variants: Vec<Variant<WorkContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Work {
    /// Render as `<work>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("work");
        element.set_opt_attr("role", self.role.map(|r| r.as_str()));
        element.set_opt_attr("type", self.work_type.map(|t| t.as_str()));
        element.set_opt_attr("class", self.class.map(|c| c.as_str()));
        element.push(self.entry.to_element());
        push_versions(&mut element, &self.versions);
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::common::NameContent;
    use crate::xobis::entry::NamePart;

    #[test]
    fn test_work_title_parts() {
        let name = Name::from_parts(vec![
            NamePart::new(WorkPart::Generic, NameContent::new("Gray's anatomy").with_nonfiling(0)),
            NamePart::new(WorkPart::Subtitle, NameContent::new("the anatomical basis")),
        ])
        .unwrap();
        let work = Work {
            role: Some(Role::Instance),
            work_type: Some(WorkType::Intellectual),
            class: Some(WorkClass::Individual),
            entry: MainEntry::new(WorkContent::new(name)),
            versions: Vec::new(),
            variants: Vec::new(),
            notes: Vec::new(),
        };
        let element = work.to_element();
        assert_eq!(element.attr("role"), Some("instance"));
        let parts = element.path(&["entry", "name"]).unwrap().children_named("part");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1].attr("type"), Some("subtitle"));
    }
}
