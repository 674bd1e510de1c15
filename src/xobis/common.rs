//! Shared XOBIS substructures: content, names, link attributes, generic
//! types, notes, entry groups and identifiers.

use crate::error::{Result, XobisError};
use crate::xml::Element;
use crate::xobis::refs::Ref;

xobis_vocabulary! {
    /// Class of a note.
    NoteClass, "note class" {
        Transcription => "transcription",
        Annotation => "annotation",
        Documentation => "documentation",
        Description => "description",
    }
}

xobis_vocabulary! {
    /// Substitute attribute of a variant entry.
    Substitute, "substitute" {
        Abbrev => "abbrev",
        Citation => "citation",
        Code => "code",
        Singular => "singular",
    }
}

xobis_vocabulary! {
    /// Role of an Object or Work.
    Role, "role" {
        Instance => "instance",
        Authority => "authority",
        AuthorityInstance => "authority instance",
    }
}

xobis_vocabulary! {
    /// Base status of an identifier.
    IdStatusKind, "id status" {
        Valid => "valid",
        Invalid => "invalid",
        Cancelled => "cancelled",
        Incorrect => "incorrect",
    }
}

xobis_vocabulary! {
    /// Sumption marker on concept-family variants.
    Includes, "includes" {
        Broader => "broader",
        Related => "related",
        Narrower => "narrower",
    }
}

/// Text with an optional language tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    /// Text
    pub text: String,
    /// Language tag
    pub lang: Option<String>,
}

impl Content {
    /// Content without a language.
    pub fn new(text: impl Into<String>) -> Self {
        Content {
            text: text.into(),
            lang: None,
        }
    }

    /// Set the language tag.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Render as `<name lang?>text</name>`.
    #[must_use]
    pub fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        element.set_opt_attr("lang", self.lang.as_ref());
        element.push_text(self.text.as_str());
        element
    }
}

/// A name: text with optional language, transliteration key and number of
/// non-filing characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameContent {
    /// Text
    pub text: String,
    /// Language tag
    pub lang: Option<String>,
    /// Transliteration scheme
    pub translit: Option<String>,
    /// Leading characters ignored when filing
    pub nonfiling: u32,
}

impl NameContent {
    /// A name with only text.
    pub fn new(text: impl Into<String>) -> Self {
        NameContent {
            text: text.into(),
            ..NameContent::default()
        }
    }

    /// Set the language tag.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Set the transliteration key.
    #[must_use]
    pub fn with_translit(mut self, translit: impl Into<String>) -> Self {
        self.translit = Some(translit.into());
        self
    }

    /// Set the non-filing character count.
    #[must_use]
    pub fn with_nonfiling(mut self, nonfiling: u32) -> Self {
        self.nonfiling = nonfiling;
        self
    }

    /// Write attributes and text onto an element.
    pub fn write_into(&self, element: &mut Element) {
        element.set_opt_attr("lang", self.lang.as_ref());
        element.set_opt_attr("translit", self.translit.as_ref());
        if self.nonfiling > 0 {
            element.set_attr("nonfiling", self.nonfiling.to_string());
        }
        element.push_text(self.text.as_str());
    }

    /// Render as `<name ...>text</name>`.
    #[must_use]
    pub fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        self.write_into(&mut element);
        element
    }
}

/// XLink title and optional href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAttributes {
    /// `xlink:title`
    pub title: String,
    /// `xlink:href`
    pub href: Option<String>,
}

impl LinkAttributes {
    /// Link attributes with a title and optional href.
    pub fn new(title: impl Into<String>, href: Option<String>) -> Self {
        LinkAttributes {
            title: title.into(),
            href,
        }
    }

    /// Write `xlink:href` and `xlink:title`.
    pub fn write_into(&self, element: &mut Element) {
        element.set_opt_attr("xlink:href", self.href.as_ref());
        element.set_attr("xlink:title", self.title.as_str());
    }

    /// Render as an empty element carrying only link attributes.
    #[must_use]
    pub fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        self.write_into(&mut element);
        element
    }
}

/// A `<type>` element: link attributes plus a role URI.
///
/// The href and role are both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericType {
    /// Title and href
    pub link: LinkAttributes,
    /// `xlink:role`
    pub role: Option<String>,
}

impl GenericType {
    /// Create a generic type.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] if exactly one of `href` and `role`
    /// is given.
    pub fn new(title: impl Into<String>, href: Option<String>, role: Option<String>) -> Result<Self> {
        let title = title.into();
        if href.is_some() != role.is_some() {
            return Err(XobisError::Invariant(format!(
                "generic type {title:?} needs both href and role, or neither"
            )));
        }
        Ok(GenericType {
            link: LinkAttributes::new(title, href),
            role,
        })
    }

    /// A type with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        GenericType {
            link: LinkAttributes::new(title, None),
            role: None,
        }
    }

    /// The type's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.link.title
    }

    /// Render as `<type .../>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = self.link.to_element("type");
        element.set_opt_attr("xlink:role", self.role.as_ref());
        element
    }
}

/// Attributes grouping entries that share a scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryGroupAttributes {
    /// Entry id
    pub id: Option<String>,
    /// Group name
    pub group: Option<String>,
    /// Preferred flag
    pub preferred: Option<bool>,
}

impl EntryGroupAttributes {
    /// Whether any attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.group.is_none() && self.preferred.is_none()
    }

    /// Write `id`, `group` and `preferred`.
    pub fn write_into(&self, element: &mut Element) {
        element.set_opt_attr("id", self.id.as_ref());
        element.set_opt_attr("group", self.group.as_ref());
        if let Some(preferred) = self.preferred {
            element.set_attr("preferred", if preferred { "true" } else { "false" });
        }
    }
}

/// A note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Note text
    pub content: Content,
    /// Note class
    pub class: Option<NoteClass>,
    /// Note type title and href
    pub link: Option<LinkAttributes>,
    /// Note type role URI
    pub role: Option<String>,
    /// Where the note comes from
    pub sources: Vec<Ref>,
}

impl Note {
    /// A plain note.
    pub fn new(content: Content) -> Self {
        Note {
            content,
            class: None,
            link: None,
            role: None,
            sources: Vec::new(),
        }
    }

    /// Set the note class.
    #[must_use]
    pub fn with_class(mut self, class: NoteClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Set the note type link and role.
    #[must_use]
    pub fn with_link(mut self, link: LinkAttributes, role: Option<String>) -> Self {
        self.link = Some(link);
        self.role = role;
        self
    }

    /// Add a source.
    #[must_use]
    pub fn with_source(mut self, source: Ref) -> Self {
        self.sources.push(source);
        self
    }

    /// Render as `<note>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("note");
        element.set_opt_attr("class", self.class.map(|c| c.as_str()));
        if let Some(link) = &self.link {
            link.write_into(&mut element);
        }
        element.set_opt_attr("xlink:role", self.role.as_ref());
        element.push(self.content.to_element("content"));
        element.push_list("sources", self.sources.iter().map(Ref::to_element).collect());
        element
    }
}

/// Render a `<notes>` wrapper into `parent` when there are notes.
pub fn push_notes(parent: &mut Element, notes: &[Note]) {
    parent.push_list("notes", notes.iter().map(Note::to_element).collect());
}

/// Identifier status: a base status with an optional " linking" suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdStatus {
    /// Base status
    pub kind: IdStatusKind,
    /// Whether the identifier links to another record
    pub linking: bool,
}

impl IdStatus {
    /// Status without the linking suffix.
    #[must_use]
    pub const fn plain(kind: IdStatusKind) -> Self {
        IdStatus {
            kind,
            linking: false,
        }
    }

    /// Status with the linking suffix.
    #[must_use]
    pub const fn linking(kind: IdStatusKind) -> Self {
        IdStatus {
            kind,
            linking: true,
        }
    }

    /// Parse `"valid"`, `"cancelled linking"`, etc.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] for anything else.
    pub fn parse(value: &str) -> Result<Self> {
        match value.strip_suffix(" linking") {
            Some(base) => Ok(IdStatus::linking(IdStatusKind::parse(base)?)),
            None => Ok(IdStatus::plain(IdStatusKind::parse(value)?)),
        }
    }

    /// Literal attribute value.
    #[must_use]
    pub fn as_string(&self) -> String {
        if self.linking {
            format!("{} linking", self.kind.as_str())
        } else {
            self.kind.as_str().to_string()
        }
    }
}

/// One description of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdDescription {
    /// A ref, typically to the issuing organization
    Ref(Box<Ref>),
    /// Free text
    Text(String),
}

/// An identifier: status, descriptions, value and notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdContent {
    /// Status
    pub status: Option<IdStatus>,
    /// One or more descriptions
    pub descriptions: Vec<IdDescription>,
    /// Identifier value
    pub value: String,
    /// Notes
    pub notes: Vec<Note>,
}

impl IdContent {
    /// Create an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] when there is no description or the
    /// value is empty.
    pub fn new(
        status: Option<IdStatus>,
        descriptions: Vec<IdDescription>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let value = value.into();
        if descriptions.is_empty() {
            return Err(XobisError::Invariant(format!(
                "identifier {value:?} needs at least one description"
            )));
        }
        if value.trim().is_empty() {
            return Err(XobisError::Invariant("identifier value is empty".into()));
        }
        Ok(IdContent {
            status,
            descriptions,
            value,
            notes: Vec::new(),
        })
    }

    /// Render as `<id>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("id");
        element.set_opt_attr("status", self.status.map(|s| s.as_string()));
        for description in &self.descriptions {
            let mut described = Element::new("description");
            match description {
                IdDescription::Ref(reference) => described.push(reference.to_element()),
                IdDescription::Text(text) => described.push_text(text.as_str()),
            }
            element.push(described);
        }
        element.push(Element::text_element("value", self.value.as_str()));
        push_notes(&mut element, &self.notes);
        element
    }
}
