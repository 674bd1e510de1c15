//! The Language principal element: natural and constructed languages and scripts.

use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::concept::Usage;
use crate::xobis::entry::NamedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a Language.
    LanguageType, "language type" {
        Natural => "natural",
        Constructed => "constructed",
        Script => "script",
    }
}

/// The Language principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Type
    pub language_type: Option<LanguageType>,
    /// Usage
    pub usage: Option<Usage>,
    /// Main entry
    pub entry: MainEntry<NamedContent>,
    /// Variants
    pub variants: Vec<Variant<NamedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Language {
    /// Render as `<language>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("language");
        element.set_opt_attr("type", self.language_type.map(|t| t.as_str()));
        element.set_opt_attr("usage", self.usage.map(|u| u.as_str()));
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}
