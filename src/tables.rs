//! Static MARC tag tables shared by the transformers.
//!
//! Everything here is a pure function of a tag (and sometimes indicators):
//! which subfield carries the relator, which carries a control number,
//! default relators for linking entries, note rules, alternate identifier
//! rules.

use crate::element_type::ElementType;
use crate::xobis::{IdStatusKind, NoteClass};

/// Subfield carrying the relator (relationship name or variant type).
///
/// # Examples
///
/// ```
/// use xobis::tables::relator_code;
///
/// assert_eq!(relator_code("700"), 'e');
/// assert_eq!(relator_code("711"), 'j');
/// assert_eq!(relator_code("776"), 'i');
/// ```
#[must_use]
pub fn relator_code(tag: &str) -> char {
    match tag {
        "246" | "411" => 'i',
        "111" | "511" | "611" | "711" => 'j',
        t if is_linking_entry(t) => 'i',
        _ => 'e',
    }
}

/// Whether a tag is a linking entry (760-789).
#[must_use]
pub fn is_linking_entry(tag: &str) -> bool {
    matches!(tag.parse::<u16>(), Ok(760..=789))
}

/// Subfield carrying an explicit control number for a linked record.
#[must_use]
pub fn link_code(tag: &str) -> Option<char> {
    match tag {
        "130" | "530" | "730" | "830" | "963" => Some('w'),
        t if is_linking_entry(t) => Some('w'),
        "100" | "110" | "111" | "500" | "510" | "511" | "550" | "551" | "555" | "580" | "582"
        | "600" | "610" | "611" | "650" | "651" | "653" | "655" | "700" | "710" | "711" | "748"
        | "750" | "751" | "987" => Some('0'),
        _ => None,
    }
}

/// Default relator of a linking entry field.
///
/// 780 and 785 are refined by the second indicator.
#[must_use]
pub fn linking_entry_relator(tag: &str, indicator2: char) -> &'static str {
    match (tag, indicator2) {
        ("780", '0') => "Continues",
        ("780", '1') => "Continues in part",
        ("780", '2') => "Supersedes",
        ("780", '3') => "Supersedes in part",
        ("780", '4') => "Formed by the union of",
        ("780", '5') => "Absorbed",
        ("780", '6') => "Absorbed in part",
        ("780", '7') => "Separated from",
        ("780", _) => "Preceded by",
        ("785", '0') => "Continued by",
        ("785", '1') => "Continued in part by",
        ("785", '2') => "Superseded by",
        ("785", '3') => "Superseded in part by",
        ("785", '4') => "Absorbed by",
        ("785", '5') => "Absorbed in part by",
        ("785", '6') => "Split into",
        ("785", '7') => "Merged with",
        ("785", '8') => "Changed back to",
        ("785", _) => "Succeeded by",
        ("760", _) => "Main Series",
        ("762", _) => "Subseries",
        ("765", _) => "Translation of",
        ("767", _) => "Translated as",
        ("770", _) => "Supplement",
        ("772", _) => "Supplement to",
        ("773", _) => "Host Item",
        ("774", _) => "Constituent Unit",
        ("775", _) => "Other Edition",
        ("776", _) => "Other Physical Form",
        ("777", _) => "Issued With",
        ("786", _) => "Data Source",
        _ => "Related",
    }
}

/// Which records a note rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteScope {
    /// Bibliographic Works and Objects
    Bibliographic,
    /// Any authority record
    Authority,
    /// Being, Organization and Event authorities
    Agents,
    /// Holdings records
    Holdings,
}

impl NoteScope {
    /// Whether a record of this element type and kind is in scope.
    #[must_use]
    pub fn applies(&self, element_type: ElementType, is_authority: bool) -> bool {
        match self {
            NoteScope::Bibliographic => {
                !is_authority && matches!(element_type, ElementType::Work | ElementType::Object)
            }
            NoteScope::Authority => is_authority,
            NoteScope::Agents => matches!(
                element_type,
                ElementType::Being | ElementType::Organization | ElementType::Event
            ),
            NoteScope::Holdings => element_type == ElementType::Holdings,
        }
    }
}

/// Source attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSource {
    /// The Library of Congress, when the record was cataloged by `DLC`
    LibraryOfCongress,
    /// MeSH, when the record follows `mesh` conventions (040 `$f`)
    Mesh,
}

/// How one tag becomes a note.
#[derive(Debug, Clone, Copy)]
pub struct NoteRule {
    /// Tag
    pub tag: &'static str,
    /// Records the rule applies to
    pub scope: NoteScope,
    /// Note class
    pub class: NoteClass,
    /// Note type, the title of a note-type Concept
    pub note_type: &'static str,
    /// Subfields joined into the content
    pub codes: &'static [char],
    /// Optional source
    pub source: Option<NoteSource>,
}

macro_rules! note_rule {
    ($tag:literal, $scope:ident, $class:ident, $note_type:literal, $codes:expr) => {
        NoteRule {
            tag: $tag,
            scope: NoteScope::$scope,
            class: NoteClass::$class,
            note_type: $note_type,
            codes: $codes,
            source: None,
        }
    };
    ($tag:literal, $scope:ident, $class:ident, $note_type:literal, $codes:expr, $source:ident) => {
        NoteRule {
            tag: $tag,
            scope: NoteScope::$scope,
            class: NoteClass::$class,
            note_type: $note_type,
            codes: $codes,
            source: Some(NoteSource::$source),
        }
    };
}

/// Every note rule, in no particular order.
///
/// 245, 260/264, 490 and 852 have dedicated handling in the note
/// transformer and appear here for their class and type only.
pub const NOTE_RULES: &[NoteRule] = &[
    note_rule!("245", Bibliographic, Transcription, "Statement of Responsibility Note", &['c']),
    note_rule!("250", Bibliographic, Transcription, "Edition Note", &['a', 'b']),
    note_rule!("260", Bibliographic, Transcription, "Publication Note", &['a', 'b', 'c']),
    note_rule!("264", Bibliographic, Transcription, "Publication Note", &['a', 'b', 'c']),
    note_rule!("300", Bibliographic, Transcription, "Physical Description Note", &['a', 'b', 'c', 'e']),
    note_rule!("310", Bibliographic, Transcription, "Frequency Note", &['a', 'b']),
    note_rule!("321", Bibliographic, Transcription, "Frequency Note", &['a', 'b']),
    note_rule!("362", Bibliographic, Transcription, "Dates of Publication Note", &['a']),
    note_rule!("490", Bibliographic, Transcription, "Series Note", &['a', 'v']),
    note_rule!("500", Bibliographic, Description, "General Note", &['a']),
    note_rule!("502", Bibliographic, Description, "Dissertation Note", &['a', 'b', 'c', 'd']),
    note_rule!("504", Bibliographic, Description, "Bibliography Note", &['a']),
    note_rule!("505", Bibliographic, Transcription, "Contents Note", &['a', 't', 'r']),
    note_rule!("506", Bibliographic, Description, "Restrictions on Access Note", &['a']),
    note_rule!("520", Bibliographic, Description, "Summary Note", &['a', 'b']),
    note_rule!("530", Bibliographic, Description, "Additional Physical Form Note", &['a']),
    note_rule!("538", Bibliographic, Description, "System Details Note", &['a']),
    note_rule!("546", Bibliographic, Description, "Language Note", &['a', 'b']),
    note_rule!("588", Bibliographic, Documentation, "Source of Description Note", &['a']),
    note_rule!("590", Bibliographic, Annotation, "Local Note", &['a']),
    note_rule!("360", Authority, Annotation, "Complex See Also Note", &['a', 'i']),
    note_rule!("667", Authority, Annotation, "Internal Note", &['a']),
    note_rule!("670", Authority, Documentation, "Source Data Found Note", &['a', 'b'], LibraryOfCongress),
    note_rule!("675", Authority, Documentation, "Source Data Not Found Note", &['a']),
    note_rule!("678", Agents, Description, "Biographical or Historical Note", &['a', 'b']),
    note_rule!("680", Authority, Description, "Public Note", &['i', 'a'], Mesh),
    note_rule!("681", Authority, Annotation, "Example Note", &['i', 'a']),
    note_rule!("682", Authority, Annotation, "Deleted Heading Note", &['a', 'i']),
    note_rule!("688", Authority, Documentation, "History Note", &['a']),
    note_rule!("852", Holdings, Annotation, "Holdings Note", &['z']),
    note_rule!("866", Holdings, Transcription, "Textual Holdings Note", &['a']),
];

/// The note rule for a tag.
#[must_use]
pub fn note_rule(tag: &str) -> Option<&'static NoteRule> {
    NOTE_RULES.iter().find(|rule| rule.tag == tag)
}

/// Leading label of a 260 or 264 note, by indicators.
///
/// `Ok(None)` means no label; `Err(())` means the indicators are invalid
/// and the field should be skipped.
#[allow(clippy::result_unit_err)]
pub fn publication_label(tag: &str, indicator1: char, indicator2: char) -> Result<Option<&'static str>, ()> {
    match (tag, indicator1, indicator2) {
        ("260", ' ' | '#', _) => Ok(None),
        ("260", '2', _) => Ok(Some("Intervening publisher")),
        ("260", '3', _) => Ok(Some("Current publisher")),
        ("264", _, '0') => Ok(Some("Production")),
        ("264", _, '1') => Ok(Some("Publication")),
        ("264", _, '2') => Ok(Some("Distribution")),
        ("264", _, '3') => Ok(Some("Manufacture")),
        ("264", _, '4') => Ok(Some("Copyright notice date")),
        _ => Err(()),
    }
}

/// How one subfield of one tag becomes an alternate identifier.
#[derive(Debug, Clone, Copy)]
pub struct AlternateIdRule {
    /// Tag
    pub tag: &'static str,
    /// Subfield holding the identifier
    pub code: char,
    /// Description text
    pub description: &'static str,
    /// Status
    pub status: IdStatusKind,
}

macro_rules! alternate_id {
    ($tag:literal, $code:literal, $description:literal, $status:ident) => {
        AlternateIdRule {
            tag: $tag,
            code: $code,
            description: $description,
            status: IdStatusKind::$status,
        }
    };
}

/// Alternate identifier rules, in output order.
///
/// 035 is handled separately: its description comes from the
/// parenthesized prefix of the value.
pub const ALTERNATE_ID_RULES: &[AlternateIdRule] = &[
    alternate_id!("010", 'a', "LCCN", Valid),
    alternate_id!("010", 'z', "LCCN", Cancelled),
    alternate_id!("015", 'a', "National Bibliography Number", Valid),
    alternate_id!("016", 'a', "National Bibliographic Agency Control Number", Valid),
    alternate_id!("020", 'a', "ISBN", Valid),
    alternate_id!("020", 'z', "ISBN", Invalid),
    alternate_id!("022", 'a', "ISSN", Valid),
    alternate_id!("022", 'y', "ISSN", Incorrect),
    alternate_id!("022", 'z', "ISSN", Cancelled),
    alternate_id!("024", 'a', "Standard Identifier", Valid),
    alternate_id!("027", 'a', "STRN", Valid),
    alternate_id!("028", 'a', "Publisher Number", Valid),
    alternate_id!("030", 'a', "CODEN", Valid),
    alternate_id!("074", 'a', "GPO Item Number", Valid),
    alternate_id!("086", 'a', "Government Document Number", Valid),
    alternate_id!("050", 'a', "LC Class Number", Valid),
    alternate_id!("060", 'a', "NLM Class Number", Valid),
    alternate_id!("902", 'a', "Lane Local ID", Valid),
    alternate_id!("990", 'w', "Legacy Control Number", Valid),
];

/// Description of an established-heading equivalent (authority 7XX), by
/// second indicator.
#[must_use]
pub fn heading_equivalent(indicator2: char) -> Option<&'static str> {
    match indicator2 {
        '0' => Some("LC heading equivalent"),
        '2' => Some("NLM heading equivalent"),
        _ => None,
    }
}

/// Creator-specific "created" action type, by cataloging source (040 `$a`).
#[must_use]
pub fn created_action(source: Option<&str>) -> &'static str {
    match source {
        Some("CStL") => "Lane created",
        Some("DLC") => "LC created",
        Some("DNLM") => "NLM created",
        _ => "Created",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relator_codes() {
        assert_eq!(relator_code("100"), 'e');
        assert_eq!(relator_code("246"), 'i');
        assert_eq!(relator_code("611"), 'j');
        assert_eq!(relator_code("787"), 'i');
    }

    #[test]
    fn test_link_codes() {
        assert_eq!(link_code("830"), Some('w'));
        assert_eq!(link_code("775"), Some('w'));
        assert_eq!(link_code("650"), Some('0'));
        assert_eq!(link_code("245"), None);
    }

    #[test]
    fn test_linking_entry_relators() {
        assert_eq!(linking_entry_relator("780", '0'), "Continues");
        assert_eq!(linking_entry_relator("785", '9'), "Succeeded by");
        assert_eq!(linking_entry_relator("776", ' '), "Other Physical Form");
        assert_eq!(linking_entry_relator("787", ' '), "Related");
    }

    #[test]
    fn test_note_rules_are_unique() {
        for (i, rule) in NOTE_RULES.iter().enumerate() {
            assert!(
                NOTE_RULES[i + 1..].iter().all(|other| other.tag != rule.tag),
                "duplicate rule for {}",
                rule.tag
            );
        }
        assert_eq!(note_rule("504").map(|r| r.note_type), Some("Bibliography Note"));
        assert!(note_rule("999").is_none());
    }

    #[test]
    fn test_note_scope() {
        assert!(NoteScope::Bibliographic.applies(ElementType::Work, false));
        assert!(!NoteScope::Bibliographic.applies(ElementType::Work, true));
        assert!(NoteScope::Agents.applies(ElementType::Being, true));
        assert!(!NoteScope::Agents.applies(ElementType::Concept, true));
    }

    #[test]
    fn test_publication_labels() {
        assert_eq!(publication_label("260", ' ', ' '), Ok(None));
        assert_eq!(publication_label("260", '3', ' '), Ok(Some("Current publisher")));
        assert_eq!(publication_label("264", ' ', '4'), Ok(Some("Copyright notice date")));
        assert!(publication_label("264", ' ', '9').is_err());
        assert!(publication_label("260", '1', ' ').is_err());
    }

    #[test]
    fn test_created_action() {
        assert_eq!(created_action(Some("DNLM")), "NLM created");
        assert_eq!(created_action(None), "Created");
    }
}
