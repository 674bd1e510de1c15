//! The Organization principal element.

use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::entry::PrequalifiedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of an Organization.
    OrganizationType, "organization type" {
        Business => "business",
        Government => "government",
        Nonprofit => "nonprofit",
        Other => "other",
    }
}

/// The Organization principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Type
    pub organization_type: Option<OrganizationType>,
    /// Main entry
    pub entry: MainEntry<PrequalifiedContent>,
    /// Variants
    pub variants: Vec<Variant<PrequalifiedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Organization {
    /// Render as `<organization>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("organization");
        element.set_opt_attr("type", self.organization_type.map(|t| t.as_str()));
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}
