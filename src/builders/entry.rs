//! Entry content accumulation shared by main entries, variants and refs.

use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::xobis::{
    BeingContent, BeingPart, ElementRef, GenericType, LinkAttributes, Name, NameContent, NamePart,
    NamedContent, PrequalifiedContent, Ref, TimeContent, TimeOrDurationRef, WorkContent, WorkPart,
};

/// One item produced by the name parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameItem {
    /// A name or name part, with its part type when the element has typed parts
    Name {
        /// The text
        content: NameContent,
        /// Part type, e.g. `surname` or `subtitle`
        part_type: Option<&'static str>,
    },
    /// A qualifier (or prequalifier, when it precedes the name)
    Qualifier(Ref),
    /// The time of a Time entry
    Time(TimeOrDurationRef),
}

impl NameItem {
    /// An untyped name.
    pub fn name(content: NameContent) -> Self {
        NameItem::Name {
            content,
            part_type: None,
        }
    }

    /// A typed name part.
    pub fn part(content: NameContent, part_type: &'static str) -> Self {
        NameItem::Name {
            content,
            part_type: Some(part_type),
        }
    }
}

pub(crate) fn disallowed(element_type: ElementType, what: &str) -> XobisError {
    XobisError::Structural(format!("{element_type} does not take {what}"))
}

/// Accumulates names, qualifiers and the Being/Time extras of one entry.
///
/// Event and Organization entries route qualifiers added before the first
/// name to the prequalifier slot.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    element_type: ElementType,
    names: Vec<(NameContent, Option<String>)>,
    prequalifiers: Vec<Ref>,
    qualifiers: Vec<Ref>,
    entry_type: Option<GenericType>,
    time: Option<TimeOrDurationRef>,
}

impl EntryBuilder {
    /// An empty entry for an element type.
    #[must_use]
    pub fn new(element_type: ElementType) -> Self {
        EntryBuilder {
            element_type,
            names: Vec::new(),
            prequalifiers: Vec::new(),
            qualifiers: Vec::new(),
            entry_type: None,
            time: None,
        }
    }

    /// The element type this entry is for.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Whether a name has been added.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.names.is_empty()
    }

    /// Add a name or name part.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] for Time and Holdings entries or a
    /// typed part on an element without typed parts, and
    /// [`XobisError::Invariant`] for a part type outside the vocabulary.
    pub fn add_name(&mut self, name: NameContent, part_type: Option<&str>) -> Result<&mut Self> {
        match (self.element_type, part_type) {
            (ElementType::Time | ElementType::Holdings, _) => {
                return Err(disallowed(self.element_type, "names"));
            }
            (ElementType::Being, Some(part)) => {
                BeingPart::parse(part)?;
            }
            (ElementType::Work, Some(part)) => {
                WorkPart::parse(part)?;
            }
            (_, Some(part)) if part != "generic" => {
                return Err(disallowed(self.element_type, "typed name parts"));
            }
            _ => {}
        }
        self.names.push((name, part_type.map(str::to_string)));
        Ok(self)
    }

    /// Add a qualifier; before the first name, Event and Organization
    /// entries take it as a prequalifier.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] for Time and Holdings entries, or a
    /// prequalifier that is not an Event, Organization or Place.
    pub fn add_qualifier(&mut self, qualifier: Ref) -> Result<&mut Self> {
        match self.element_type {
            ElementType::Time | ElementType::Holdings => {
                return Err(disallowed(self.element_type, "qualifiers"));
            }
            ElementType::Event | ElementType::Organization if self.names.is_empty() => {
                if !qualifier.element_type().can_prequalify() {
                    return Err(XobisError::Structural(format!(
                        "prequalifier must be an event, organization or place, got {}",
                        qualifier.element_type()
                    )));
                }
                self.prequalifiers.push(qualifier);
            }
            _ => self.qualifiers.push(qualifier),
        }
        Ok(self)
    }

    /// Set the entry type (Being only).
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] for any other element type.
    pub fn set_entry_type(&mut self, entry_type: GenericType) -> Result<&mut Self> {
        if self.element_type != ElementType::Being {
            return Err(disallowed(self.element_type, "an entry type"));
        }
        self.entry_type = Some(entry_type);
        Ok(self)
    }

    /// Set the entry time (Being) or the time itself (Time).
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Structural`] for any other element type.
    pub fn set_time(&mut self, time: TimeOrDurationRef) -> Result<&mut Self> {
        if !matches!(self.element_type, ElementType::Being | ElementType::Time) {
            return Err(disallowed(self.element_type, "an entry time"));
        }
        self.time = Some(time);
        Ok(self)
    }

    /// Add one parser item.
    ///
    /// # Errors
    ///
    /// See [`Self::add_name`], [`Self::add_qualifier`] and [`Self::set_time`].
    pub fn add_item(&mut self, item: NameItem) -> Result<&mut Self> {
        match item {
            NameItem::Name { content, part_type } => self.add_name(content, part_type),
            NameItem::Qualifier(qualifier) => self.add_qualifier(qualifier),
            NameItem::Time(time) if self.element_type == ElementType::Time => self.set_time(time),
            NameItem::Time(time) => self.add_qualifier(Ref::from(time)),
        }
    }

    /// Add every parser item in order.
    ///
    /// # Errors
    ///
    /// Stops at the first item that fails; see [`Self::add_item`].
    pub fn add_items(&mut self, items: impl IntoIterator<Item = NameItem>) -> Result<&mut Self> {
        for item in items {
            self.add_item(item)?;
        }
        Ok(self)
    }

    fn expect(&self, element_types: &[ElementType], shape: &str) -> Result<()> {
        if element_types.contains(&self.element_type) {
            Ok(())
        } else {
            Err(XobisError::Structural(format!(
                "{} entry cannot be built as {shape} content",
                self.element_type
            )))
        }
    }

    fn single_name(&mut self) -> Result<NameContent> {
        match self.names.len() {
            0 => Err(XobisError::Invariant(format!("{} entry has no name", self.element_type))),
            1 => Ok(self.names.remove(0).0),
            n => Err(XobisError::Structural(format!(
                "{} entry takes one name, got {n}",
                self.element_type
            ))),
        }
    }

    fn typed_name<P: crate::xobis::PartType>(
        names: Vec<(NameContent, Option<String>)>,
        parse: fn(&str) -> Result<P>,
        generic: P,
    ) -> Result<Name<P>> {
        let parts = names
            .into_iter()
            .map(|(content, part_type)| {
                let part_type = match part_type {
                    Some(t) => parse(&t)?,
                    None => generic,
                };
                Ok(NamePart::new(part_type, content))
            })
            .collect::<Result<Vec<_>>>()?;
        Name::from_parts(parts)
    }

    /// Build Being content.
    ///
    /// # Errors
    ///
    /// Fails for other element types or when there is no name.
    pub fn build_being(self) -> Result<BeingContent> {
        self.expect(&[ElementType::Being], "being")?;
        let name = Self::typed_name(self.names, BeingPart::parse, BeingPart::Generic)?;
        Ok(BeingContent {
            entry_type: self.entry_type,
            time: self.time,
            name,
            qualifiers: self.qualifiers,
        })
    }

    /// Build single-name content (Concept, Language, Object, Place, String).
    ///
    /// # Errors
    ///
    /// Fails for other element types or without exactly one name.
    pub fn build_named(mut self) -> Result<NamedContent> {
        self.expect(
            &[
                ElementType::Concept,
                ElementType::Language,
                ElementType::Object,
                ElementType::Place,
                ElementType::String,
            ],
            "named",
        )?;
        let name = self.single_name()?;
        Ok(NamedContent {
            name,
            qualifiers: self.qualifiers,
        })
    }

    /// Build prequalified content (Event, Organization).
    ///
    /// # Errors
    ///
    /// Fails for other element types or without exactly one name.
    pub fn build_prequalified(mut self) -> Result<PrequalifiedContent> {
        self.expect(&[ElementType::Event, ElementType::Organization], "prequalified")?;
        let name = self.single_name()?;
        PrequalifiedContent::new(self.prequalifiers, name, self.qualifiers)
    }

    /// Build Work content.
    ///
    /// # Errors
    ///
    /// Fails for other element types or when there is no title.
    pub fn build_work(self) -> Result<WorkContent> {
        self.expect(&[ElementType::Work], "work")?;
        let name = Self::typed_name(self.names, WorkPart::parse, WorkPart::Generic)?;
        Ok(WorkContent {
            name,
            qualifiers: self.qualifiers,
        })
    }

    /// Build Time content.
    ///
    /// # Errors
    ///
    /// Fails for other element types or when no time was set.
    pub fn build_time(self) -> Result<TimeContent> {
        self.expect(&[ElementType::Time], "time")?;
        self.time
            .map(TimeContent::from)
            .ok_or_else(|| XobisError::Invariant("time entry has no time".into()))
    }

    /// Build a ref to this entry.
    ///
    /// # Errors
    ///
    /// Fails as the matching `build_*` does; Holdings cannot be referenced.
    pub fn build_ref(self, link: Option<LinkAttributes>) -> Result<Ref> {
        let wrap = |content| match &link {
            Some(link) => ElementRef::linked(content, link.clone()),
            None => ElementRef::new(content),
        };
        Ok(match self.element_type {
            ElementType::Being => Ref::Being(wrap_being(self.build_being()?, link)),
            ElementType::Concept => Ref::Concept(wrap(self.build_named()?)),
            ElementType::Language => Ref::Language(wrap(self.build_named()?)),
            ElementType::Object => Ref::Object(wrap(self.build_named()?)),
            ElementType::Place => Ref::Place(wrap(self.build_named()?)),
            ElementType::String => Ref::String(wrap(self.build_named()?)),
            ElementType::Event => Ref::Event(wrap_prequalified(self.build_prequalified()?, link)),
            ElementType::Organization => {
                Ref::Organization(wrap_prequalified(self.build_prequalified()?, link))
            }
            ElementType::Work => Ref::Work(wrap_work(self.build_work()?, link)),
            ElementType::Time => {
                let mut time = self.build_time()?.to_ref();
                time.set_link(link);
                Ref::from(time)
            }
            ElementType::Holdings => return Err(disallowed(ElementType::Holdings, "refs")),
        })
    }
}

fn wrap_being(content: BeingContent, link: Option<LinkAttributes>) -> ElementRef<BeingContent> {
    ElementRef { link, content }
}

fn wrap_prequalified(
    content: PrequalifiedContent,
    link: Option<LinkAttributes>,
) -> ElementRef<PrequalifiedContent> {
    ElementRef { link, content }
}

fn wrap_work(content: WorkContent, link: Option<LinkAttributes>) -> ElementRef<WorkContent> {
    ElementRef { link, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(element_type: ElementType, text: &str) -> Ref {
        let mut entry = EntryBuilder::new(element_type);
        entry.add_name(NameContent::new(text), None).unwrap();
        entry.build_ref(None).unwrap()
    }

    #[test]
    fn test_generic_name_collapses() {
        let mut entry = EntryBuilder::new(ElementType::Being);
        entry.add_name(NameContent::new("Homer"), Some("generic")).unwrap();
        let content = entry.build_being().unwrap();
        assert!(matches!(content.name, Name::Plain(_)));

        let mut entry = EntryBuilder::new(ElementType::Being);
        entry.add_name(NameContent::new("Smith"), Some("surname")).unwrap();
        entry.add_name(NameContent::new("John"), Some("given")).unwrap();
        let content = entry.build_being().unwrap();
        assert_eq!(content.name.part_types(), vec![BeingPart::Surname, BeingPart::Given]);
    }

    #[test]
    fn test_prequalifier_routing() {
        let mut entry = EntryBuilder::new(ElementType::Organization);
        entry.add_qualifier(simple(ElementType::Place, "United States")).unwrap();
        entry.add_name(NameContent::new("Congress"), None).unwrap();
        entry.add_qualifier(simple(ElementType::String, "2nd")).unwrap();
        let content = entry.build_prequalified().unwrap();
        assert_eq!(content.prequalifiers.len(), 1);
        assert_eq!(content.qualifiers.len(), 1);
        assert_eq!(content.name.text, "Congress");
    }

    #[test]
    fn test_bad_prequalifier_is_structural() {
        let mut entry = EntryBuilder::new(ElementType::Event);
        let result = entry.add_qualifier(simple(ElementType::Concept, "Anatomy"));
        assert!(matches!(result, Err(XobisError::Structural(_))));
    }

    #[test]
    fn test_disallowed_calls() {
        let mut entry = EntryBuilder::new(ElementType::Concept);
        assert!(matches!(
            entry.set_entry_type(GenericType::titled("Born")),
            Err(XobisError::Structural(_))
        ));
        assert!(matches!(
            entry.add_name(NameContent::new("x"), Some("surname")),
            Err(XobisError::Structural(_))
        ));
        let mut being = EntryBuilder::new(ElementType::Being);
        assert!(matches!(
            being.add_name(NameContent::new("x"), Some("nickname")),
            Err(XobisError::Invariant(_))
        ));
    }

    #[test]
    fn test_named_content_needs_one_name() {
        let entry = EntryBuilder::new(ElementType::Concept);
        assert!(entry.build_named().is_err());

        let mut entry = EntryBuilder::new(ElementType::Concept);
        entry.add_name(NameContent::new("a"), None).unwrap();
        entry.add_name(NameContent::new("b"), None).unwrap();
        assert!(matches!(entry.build_named(), Err(XobisError::Structural(_))));
    }

    #[test]
    fn test_wrong_shape_is_structural() {
        let mut entry = EntryBuilder::new(ElementType::Concept);
        entry.add_name(NameContent::new("a"), None).unwrap();
        assert!(matches!(entry.build_work(), Err(XobisError::Structural(_))));
    }

    #[test]
    fn test_ref_carries_link() {
        let mut entry = EntryBuilder::new(ElementType::Work);
        entry.add_name(NameContent::new("Hamlet"), None).unwrap();
        let reference = entry
            .build_ref(Some(LinkAttributes::new("Hamlet", Some("(CStL)Z9".into()))))
            .unwrap();
        assert_eq!(reference.href(), Some("(CStL)Z9"));
        assert_eq!(reference.element_type(), ElementType::Work);
    }
}
