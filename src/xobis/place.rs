//! The Place principal element.

use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::concept::Usage;
use crate::xobis::entry::NamedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a Place.
    PlaceType, "place type" {
        Natural => "natural",
        Constructed => "constructed",
        Jurisdictional => "jurisdictional",
    }
}

/// The Place principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    /// Type
    pub place_type: Option<PlaceType>,
    /// Usage
    pub usage: Option<Usage>,
    /// Main entry
    pub entry: MainEntry<NamedContent>,
    /// Variants
    pub variants: Vec<Variant<NamedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Place {
    /// Render as `<place>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("place");
        element.set_opt_attr("type", self.place_type.map(|t| t.as_str()));
        element.set_opt_attr("usage", self.usage.map(|u| u.as_str()));
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::common::NameContent;

    #[test]
    fn test_place_element() {
        let place = Place {
            place_type: Some(PlaceType::Jurisdictional),
            usage: None,
            entry: MainEntry::new(NamedContent::new(NameContent::new("France"))),
            variants: Vec::new(),
            notes: Vec::new(),
        };
        let element = place.to_element();
        assert_eq!(element.attr("type"), Some("jurisdictional"));
        assert_eq!(element.attr("usage"), None);
        assert_eq!(element.path(&["entry", "name"]).unwrap().text(), "France");
    }
}
