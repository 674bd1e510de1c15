//! The String principal element: words and phrases treated as entities.

use crate::xml::Element;
use crate::xobis::common::{push_notes, LinkAttributes, Note};
use crate::xobis::entry::NamedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of a String.
    StringType, "string type" {
        Textual => "textual",
        Numeric => "numeric",
        Mixed => "mixed",
    }
}

xobis_vocabulary! {
    /// Class of a String.
    StringClass, "string class" {
        Word => "word",
        Phrase => "phrase",
    }
}

impl StringType {
    /// Type from content: digits only, letters only, or anything else.
    #[must_use]
    pub fn of(text: &str) -> Self {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if !chars.is_empty() && chars.iter().all(char::is_ascii_digit) {
            StringType::Numeric
        } else if !chars.is_empty() && chars.iter().all(|c| c.is_alphabetic()) {
            StringType::Textual
        } else {
            StringType::Mixed
        }
    }
}

impl StringClass {
    /// Class from content: one word or several.
    #[must_use]
    pub fn of(text: &str) -> Self {
        if text.split_whitespace().count() > 1 {
            StringClass::Phrase
        } else {
            StringClass::Word
        }
    }
}

/// The String principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringElement {
    /// Type
    pub string_type: Option<StringType>,
    /// Class
    pub class: Option<StringClass>,
    /// Main entry
    pub entry: MainEntry<NamedContent>,
    /// Parts of speech
    pub parts_of_speech: Vec<LinkAttributes>,
    /// Variants
    pub variants: Vec<Variant<NamedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl StringElement {
    /// Render as `<string>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("string");
        element.set_opt_attr("type", self.string_type.map(|t| t.as_str()));
        element.set_opt_attr("class", self.class.map(|c| c.as_str()));
        element.push(self.entry.to_element());
        for pos in &self.parts_of_speech {
            element.push(pos.to_element("pos"));
        }
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}
