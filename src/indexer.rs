//! Identity indexer: cross-record link resolution.
//!
//! The indexer turns a MARC field that names another record into that
//! record's control number, and a control number back into the authorized
//! form of its heading. It is built once per corpus and then shared
//! read-only by every transformation.
//!
//! # Identity strings
//!
//! An identity string is the ordered list of a field's identity subfields
//! (a fixed code set per [`IdentityKind`]) rendered as
//! `code|value|code|value...`, each value NFKC-normalized, lowercased, with
//! punctuation, separators and control characters folded to single spaces.
//!
//! # Lookups
//!
//! Lookups are total. A missing identity resolves to [`UNVERIFIED`], an
//! identity shared by several records to [`CONFLICT`]; neither is an error.

use crate::config::TransformConfig;
use crate::element_type::{broad_category, get_xobis_element_type, heading_element_type, heading_field, ElementType};
use crate::error::{Result, XobisError};
use crate::leader::RecordKind;
use crate::record::{Field, Record, Subfield};
use crate::xobis::RelationshipType;
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Href of a link whose identity matches several records.
pub const CONFLICT: &str = "conflict";

/// Href of a link whose identity matches no record.
pub const UNVERIFIED: &str = "unverified";

/// Relationship type reserved for variant typing; never returned by
/// [`Indexer::lookup_rel_types`].
pub const EQUIVALENCE: &str = "Equivalence";

const FORWARD_FILE: &str = "forward.json";
const REVERSE_FILE: &str = "reverse.json";
const RELATIONSHIPS_FILE: &str = "relationships.json";
const DATES_FILE: &str = "dates.json";

lazy_static! {
    static ref FOLDED: Regex = Regex::new(r"[\p{P}\p{Z}\p{C}|]+").unwrap();
    static ref FOUR_DIGITS: Regex = Regex::new(r"\d{4}").unwrap();
}

xobis_vocabulary! {
    /// Which forward index, and which identity subfields, a lookup uses.
    IdentityKind, "identity kind" {
        Being => "being",
        Concept => "concept",
        Event => "event",
        Language => "language",
        Object => "object",
        Organization => "organization",
        Place => "place",
        String => "string",
        Time => "time",
        WorkAuthority => "work authority",
        WorkInstance => "work instance",
    }
}

impl IdentityKind {
    /// Identity subfield codes, primary code first.
    #[must_use]
    pub const fn codes(&self) -> &'static [char] {
        match self {
            IdentityKind::WorkInstance | IdentityKind::Object => {
                &['a', 'd', 'k', 'l', 'n', 'p', 'q', 's']
            }
            IdentityKind::WorkAuthority => &['a', 'd', 'f', 'g', 'k', 'l', 'n', 'p', 'q', 's'],
            IdentityKind::Being => &['a', 'b', 'c', 'd', 'q'],
            IdentityKind::Organization => &['a', 'b', 'c', 'd', 'n'],
            IdentityKind::Event => &['a', 'c', 'd', 'e', 'n'],
            IdentityKind::Concept => &['a', 'x'],
            IdentityKind::Time | IdentityKind::Language => &['a'],
            IdentityKind::Place => &['a', 'z'],
            IdentityKind::String => &['y', 'q', 'g', '3'],
        }
    }

    /// Subfield code used by [`Indexer::simple_lookup`].
    #[must_use]
    pub const fn primary_code(&self) -> char {
        self.codes()[0]
    }

    /// Forward indices consulted for an element type, in order.
    #[must_use]
    pub fn for_element(element_type: ElementType) -> &'static [IdentityKind] {
        match element_type {
            ElementType::Being => &[IdentityKind::Being],
            ElementType::Concept => &[IdentityKind::Concept],
            ElementType::Event => &[IdentityKind::Event],
            ElementType::Language => &[IdentityKind::Language],
            ElementType::Object => &[IdentityKind::Object],
            ElementType::Organization => &[IdentityKind::Organization],
            ElementType::Place => &[IdentityKind::Place],
            ElementType::String => &[IdentityKind::String],
            ElementType::Time => &[IdentityKind::Time],
            ElementType::Work => &[IdentityKind::WorkAuthority, IdentityKind::WorkInstance],
            ElementType::Holdings => &[],
        }
    }

    /// The forward index a record's own heading goes into.
    #[must_use]
    pub fn for_record(element_type: ElementType, kind: RecordKind) -> Option<IdentityKind> {
        match (element_type, kind) {
            (ElementType::Work, RecordKind::Bibliographic) => Some(IdentityKind::WorkInstance),
            (ElementType::Work, _) => Some(IdentityKind::WorkAuthority),
            (other, _) => IdentityKind::for_element(other).first().copied(),
        }
    }
}

/// Normalize one value for an identity string.
///
/// NFKC, lowercase, every Unicode punctuation, separator and control
/// character (and `|`) folded to one space, trimmed. Idempotent.
///
/// # Examples
///
/// ```
/// use xobis::indexer::normalize;
///
/// assert_eq!(normalize("Smith, John,"), "smith john");
/// assert_eq!(normalize(&normalize("Ｓｍｉｔｈ")), "smith");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    let lowered: String = value.nfkc().collect::<String>().to_lowercase();
    let composed: String = lowered.nfkc().collect();
    FOLDED
        .replace_all(&composed, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `(code, value)` pairs that make up a field's identity for `kind`.
///
/// String fields read `$a` as `$y`. For Works, a name/title heading
/// (X00/X10/X11 with `$t`) contributes its name portion under the name's own
/// codes and then its title portion with `$t` read as `$a`. For every other
/// kind, subfields from `$t` onward are ignored.
#[must_use]
pub fn identity_subfields(field: &Field, kind: IdentityKind) -> Vec<Subfield> {
    let pick = |subfields: &[&Subfield], codes: &[char], recode: Option<(char, char)>| {
        subfields
            .iter()
            .map(|sf| match recode {
                Some((from, to)) if sf.code == from => Subfield::new(to, sf.value.as_str()),
                _ => (*sf).clone(),
            })
            .filter(|sf| codes.contains(&sf.code) && !sf.value.trim().is_empty())
            .collect::<Vec<_>>()
    };

    let all: Vec<&Subfield> = field.subfields().collect();
    match kind {
        IdentityKind::String => pick(&all, kind.codes(), Some(('a', 'y'))),
        IdentityKind::WorkAuthority | IdentityKind::WorkInstance if field.has_subfield('t') => {
            let name_kind = match field.tag.get(1..) {
                Some("00") => Some(IdentityKind::Being),
                Some("10") => Some(IdentityKind::Organization),
                Some("11") => Some(IdentityKind::Event),
                _ => None,
            };
            let title = field.subfields_from('t');
            let mut pairs = match name_kind {
                Some(name_kind) => pick(&field.subfields_before('t'), name_kind.codes(), None),
                None => Vec::new(),
            };
            pairs.extend(pick(&title, kind.codes(), Some(('t', 'a'))));
            pairs
        }
        IdentityKind::WorkAuthority | IdentityKind::WorkInstance => pick(&all, kind.codes(), None),
        _ => pick(&field.subfields_before('t'), kind.codes(), None),
    }
}

/// Render identity pairs as an identity string.
#[must_use]
pub fn identity_string(subfields: &[Subfield]) -> String {
    subfields
        .iter()
        .filter_map(|sf| {
            let value = normalize(&sf.value);
            (!value.is_empty()).then(|| format!("{}|{}", sf.code, value))
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Identity string of a field for a kind.
#[must_use]
pub fn identity(field: &Field, kind: IdentityKind) -> String {
    identity_string(&identity_subfields(field, kind))
}

/// Human-readable authorized form: values joined by spaces.
#[must_use]
pub fn authorized_form(subfields: &[Subfield]) -> String {
    subfields
        .iter()
        .map(|sf| sf.value.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Index entries contributed by one record.
#[derive(Debug, Default)]
struct RecordEntries {
    control_number: String,
    main: Option<(IdentityKind, String, Vec<Subfield>)>,
    variants: Vec<(IdentityKind, String)>,
    relationship: Option<(String, Vec<String>)>,
    date: Option<String>,
}

/// Forward, reverse, relationship-type and date indices over a corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Indexer {
    forward: BTreeMap<String, HashMap<String, String>>,
    reverse: HashMap<String, Vec<Subfield>>,
    relationships: HashMap<String, Vec<String>>,
    dates: HashMap<String, String>,
}

impl Indexer {
    /// An empty indexer; every lookup is unverified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the indices over a corpus.
    ///
    /// Per-record entries are computed in parallel and merged in input
    /// order, so the result does not depend on scheduling. Identities
    /// claimed by two records become [`CONFLICT`]; a main entry beats a
    /// variant with the same identity.
    #[must_use]
    pub fn build(records: &[Record], config: &TransformConfig) -> Self {
        let entries: Vec<RecordEntries> = records
            .par_iter()
            .filter_map(|record| record_entries(record, config))
            .collect();

        let mut main: BTreeMap<String, HashMap<String, String>> = BTreeMap::new();
        let mut variants: BTreeMap<String, HashMap<String, String>> = BTreeMap::new();
        let mut indexer = Indexer::new();

        for entry in entries {
            if let Some((kind, key, form)) = entry.main {
                claim(&mut main, kind, key, &entry.control_number);
                if indexer.reverse.contains_key(&entry.control_number) {
                    tracing::debug!(record = %entry.control_number, "duplicate control number");
                } else {
                    indexer.reverse.insert(entry.control_number.clone(), form);
                }
            }
            for (kind, key) in entry.variants {
                claim(&mut variants, kind, key, &entry.control_number);
            }
            if let Some((name, types)) = entry.relationship {
                let known = indexer.relationships.entry(name).or_default();
                for rel_type in types {
                    if !known.contains(&rel_type) {
                        known.push(rel_type);
                    }
                }
            }
            if let Some(date) = entry.date {
                indexer.dates.insert(entry.control_number, date);
            }
        }

        for (kind, identities) in variants {
            let target = main.entry(kind).or_default();
            for (key, control_number) in identities {
                target.entry(key).or_insert(control_number);
            }
        }
        indexer.forward = main;

        tracing::info!(
            records = records.len(),
            identities = indexer.forward.values().map(HashMap::len).sum::<usize>(),
            relationship_names = indexer.relationships.len(),
            "identity index built"
        );
        indexer
    }

    /// Control number of the record a field names, or a sentinel.
    ///
    /// Works consult the authority index and then the instance index.
    #[must_use]
    pub fn lookup(&self, field: &Field, element_type: ElementType) -> String {
        for kind in IdentityKind::for_element(element_type) {
            if let Some(found) = self.lookup_kind(field, *kind) {
                return found.to_string();
            }
        }
        UNVERIFIED.to_string()
    }

    fn lookup_kind(&self, field: &Field, kind: IdentityKind) -> Option<&str> {
        let key = identity(field, kind);
        if key.is_empty() {
            return None;
        }
        self.forward
            .get(kind.as_str())
            .and_then(|identities| identities.get(&key))
            .map(String::as_str)
    }

    /// Look up free text under an element type's primary subfield.
    ///
    /// Without an element type, answers only when exactly one element type
    /// knows the text: [`UNVERIFIED`] when none does, [`CONFLICT`] when
    /// several do.
    #[must_use]
    pub fn simple_lookup(&self, text: &str, element_type: Option<ElementType>) -> String {
        match element_type {
            Some(element_type) => self.lookup(&simple_field(text, element_type), element_type),
            None => match self.matching_element_types(text, ElementType::ALL).as_slice() {
                [] => UNVERIFIED.to_string(),
                [(_, found)] => found.clone(),
                _ => CONFLICT.to_string(),
            },
        }
    }

    /// The single element type among `candidates` whose index knows `text`.
    #[must_use]
    pub fn resolve_element_type(&self, text: &str, candidates: &[ElementType]) -> Option<ElementType> {
        match self.matching_element_types(text, candidates).as_slice() {
            [(element_type, _)] => Some(*element_type),
            _ => None,
        }
    }

    fn matching_element_types(&self, text: &str, candidates: &[ElementType]) -> Vec<(ElementType, String)> {
        candidates
            .iter()
            .filter_map(|element_type| {
                let found = self.lookup(&simple_field(text, *element_type), *element_type);
                (found != UNVERIFIED).then_some((*element_type, found))
            })
            .collect()
    }

    /// Authorized-form subfields of a record's heading.
    #[must_use]
    pub fn reverse_lookup(&self, control_number: &str) -> Option<&[Subfield]> {
        self.reverse.get(control_number).map(Vec::as_slice)
    }

    /// Relationship types admissible for a relationship name.
    ///
    /// [`EQUIVALENCE`] is never returned.
    #[must_use]
    pub fn lookup_rel_types(&self, name: &str) -> Vec<RelationshipType> {
        self.relationships
            .get(&normalize(name))
            .map(|types| {
                types
                    .iter()
                    .filter(|t| t.as_str() != EQUIVALENCE)
                    .filter_map(|t| RelationshipType::parse(&t.to_lowercase()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Publication date stored for a bibliographic control number.
    #[must_use]
    pub fn stored_date(&self, control_number: &str) -> Option<&str> {
        self.dates.get(control_number).map(String::as_str)
    }

    /// Number of identities across all forward indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.values().map(HashMap::len).sum()
    }

    /// Whether the forward indices are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the indices as JSON files into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or written.
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(FORWARD_FILE), serde_json::to_vec(&self.forward)?)?;
        fs::write(dir.join(REVERSE_FILE), serde_json::to_vec(&self.reverse)?)?;
        fs::write(dir.join(RELATIONSHIPS_FILE), serde_json::to_vec(&self.relationships)?)?;
        fs::write(dir.join(DATES_FILE), serde_json::to_vec(&self.dates)?)?;
        tracing::debug!(dir = %dir.display(), "identity index saved");
        Ok(())
    }

    /// Read indices written by [`Indexer::save`].
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Index`] if a file is missing, or a JSON error
    /// if one is corrupt.
    pub fn load(dir: &Path) -> Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read(&path).map_err(|e| XobisError::Index(format!("{}: {e}", path.display())))
        };
        Ok(Indexer {
            forward: serde_json::from_slice(&read(FORWARD_FILE)?)?,
            reverse: serde_json::from_slice(&read(REVERSE_FILE)?)?,
            relationships: serde_json::from_slice(&read(RELATIONSHIPS_FILE)?)?,
            dates: serde_json::from_slice(&read(DATES_FILE)?)?,
        })
    }
}

fn claim(
    index: &mut BTreeMap<String, HashMap<String, String>>,
    kind: IdentityKind,
    key: String,
    control_number: &str,
) {
    if key.is_empty() {
        return;
    }
    let identities = index.entry(kind.as_str().to_string()).or_default();
    match identities.get(&key) {
        None => {
            identities.insert(key, control_number.to_string());
        }
        Some(existing) if existing == control_number => {}
        Some(_) => {
            identities.insert(key, CONFLICT.to_string());
        }
    }
}

/// A one-subfield field carrying `text` under the primary code of an element type.
#[must_use]
pub fn simple_field(text: &str, element_type: ElementType) -> Field {
    let code = IdentityKind::for_element(element_type)
        .first()
        .map_or('a', IdentityKind::primary_code);
    Field::from_pairs("999", ' ', ' ', &[(code, text)])
}

fn record_entries(record: &Record, config: &TransformConfig) -> Option<RecordEntries> {
    let local = record.control_number()?;
    let kind = record.leader.kind();
    let element_type = get_xobis_element_type(record).ok()?;
    let identity_kind = IdentityKind::for_record(element_type, kind)?;
    let control_number = config.control_number(kind, local);

    let mut entries = RecordEntries {
        control_number,
        ..RecordEntries::default()
    };

    if let Some(heading) = heading_field(record) {
        let form = identity_subfields(heading, identity_kind);
        let key = identity_string(&form);
        entries.main = Some((identity_kind, key, form));
    }

    let variant_tags: &[&str] = match kind {
        RecordKind::Authority => &["400", "410", "411", "430", "448", "450", "451", "455", "462", "480", "481", "482", "485"],
        RecordKind::Bibliographic => &["246"],
        RecordKind::Holdings => &[],
    };
    for field in record.get_fields(variant_tags) {
        let variant_kind = if field.tag == "246" {
            identity_kind
        } else {
            match heading_element_type(field) {
                Some(ElementType::Concept) if field.tag == "450" => identity_kind,
                Some(ElementType::Work) => IdentityKind::WorkAuthority,
                Some(other) => IdentityKind::for_element(other).first().copied()?,
                None => continue,
            }
        };
        let key = identity(field, variant_kind);
        if !key.is_empty() {
            entries.variants.push((variant_kind, key));
        }
    }

    if element_type == ElementType::Concept
        && broad_category(record).as_deref() == Some("Relationships")
    {
        if let Some(name) = record.get_field("150").and_then(|f| f.get_subfield('a')) {
            let types = record
                .get_subfields("550", &['a'])
                .into_iter()
                .map(|t| t.trim().trim_end_matches('.').to_string())
                .filter(|t| t == EQUIVALENCE || RelationshipType::parse(&t.to_lowercase()).is_ok())
                .collect();
            entries.relationship = Some((normalize(name), types));
        }
    }

    if kind == RecordKind::Bibliographic {
        entries.date = publication_date(record);
    }

    Some(entries)
}

/// Publication date of a bibliographic record: 008/07-10 when numeric,
/// else the first four-digit run in 260/264 `$c`.
#[must_use]
pub fn publication_date(record: &Record) -> Option<String> {
    if let Some(date) = record.fixed_field_slice(7, 11) {
        if date.chars().all(|c| c.is_ascii_digit()) {
            return Some(date);
        }
    }
    record
        .get_fields(&["260", "264"])
        .into_iter()
        .flat_map(|f| f.get_subfield_values('c'))
        .find_map(|c| FOUR_DIGITS.find(c).map(|m| m.as_str().to_string()))
}
