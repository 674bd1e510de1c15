//! The XOBIS object model.
//!
//! Immutable typed values for every production of the XOBIS grammar. Each
//! value validates its invariants when it is constructed and renders itself
//! as an [`Element`](crate::xml::Element) via `to_element()`; a
//! [`Record`] additionally serializes to a complete document.
//!
//! Entry content is modeled once per principal element and shared between
//! the main entry ([`MainEntry`]), variants ([`Variant`]) and refs
//! ([`ElementRef`]). The [`EntryContent`] trait is the seam they share.

pub mod being;
pub mod common;
pub mod concept;
pub mod entry;
pub mod event;
pub mod holdings;
pub mod language;
pub mod object;
pub mod organization;
pub mod place;
pub mod principal;
pub mod record;
pub mod refs;
pub mod string;
pub mod time;
pub mod variant;
pub mod work;

pub use being::{Being, BeingClass, BeingContent, BeingPart, BeingType};
pub use common::{
    Content, EntryGroupAttributes, GenericType, IdContent, IdDescription, IdStatus, IdStatusKind,
    Includes, LinkAttributes, NameContent, Note, NoteClass, Role, Substitute,
};
pub use concept::{Concept, ConceptSubtype, ConceptType, Usage};
pub use entry::{Name, NamePart, NamedContent, PartType, PrequalifiedContent};
pub use event::{Event, EventType};
pub use holdings::{Holdings, HoldingsEntry, Summary};
pub use language::{Language, LanguageType};
pub use object::{Object, ObjectClass, ObjectType, Version};
pub use organization::{Organization, OrganizationType};
pub use place::{Place, PlaceType};
pub use principal::{EntryContent, MainEntry, PrincipalElement};
pub use record::{
    Action, ControlData, Degree, Record, Relationship, RelationshipName, RelationshipType,
};
pub use refs::{ElementRef, Ref};
pub use string::{StringClass, StringElement, StringType};
pub use time::{
    Certainty, DurationRef, Time, TimeContent, TimeEntryBody, TimeEntryContent, TimeEntryPart,
    TimeOrDurationRef, TimePart, TimeRef,
};
pub use variant::{Variant, VariantEntry};
pub use work::{Work, WorkClass, WorkContent, WorkPart, WorkType};
