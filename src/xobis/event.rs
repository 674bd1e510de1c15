//! The Event principal element: meetings, journeys, natural events and
//! other occurrences.

use crate::xml::Element;
use crate::xobis::common::{push_notes, Note};
use crate::xobis::entry::PrequalifiedContent;
use crate::xobis::principal::MainEntry;
use crate::xobis::variant::Variant;

xobis_vocabulary! {
    /// Type of an Event.
    EventType, "event type" {
        Natural => "natural",
        Meeting => "meeting",
        Journey => "journey",
        Occurrence => "occurrence",
        Miscellaneous => "miscellaneous",
    }
}

/// The Event principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Type
    pub event_type: Option<EventType>,
    /// Main entry
    pub entry: MainEntry<PrequalifiedContent>,
    /// Variants
    pub variants: Vec<Variant<PrequalifiedContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Event {
    /// Render as `<event>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("event");
        element.set_opt_attr("type", self.event_type.map(|t| t.as_str()));
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}
