//! Heading field to name items.
//!
//! [`NameParser::parse`] reads the subfields of a heading-style field (1XX,
//! 4XX, 5XX, 6XX, 7XX, 245 ...) and yields the items an
//! [`EntryBuilder`](crate::builders::EntryBuilder) needs: names or typed
//! name parts, and qualifier refs. Items come out in builder order, so for
//! Events and Organizations the prequalifiers precede the name.
//!
//! Problems with single subfields (an unparsable date qualifier, say) are
//! returned as warnings next to the items rather than failing the field.

use crate::builders::entry::NameItem;
use crate::builders::reference::build_simple_ref;
use crate::config::TransformConfig;
use crate::datetime::{DateContext, DateTimeParser};
use crate::element_type::{heading_element_type, ElementType};
use crate::error::XobisError;
use crate::indexer::Indexer;
use crate::record::{Field, Subfield};
use crate::tables::is_linking_entry;
use crate::xobis::{NameContent, Ref};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing periods that belong to the name: initials and common
    /// abbreviations.
    static ref ABBREVIATION: Regex = Regex::new(
        r"(?:^|[\s(.])(?:\p{Lu}|Dr|Jr|Sr|Mr|Mrs|Ms|Mme|Mlle|St|Ste|Bros|Co|Corp|Inc|Ltd|etc|Bart|Esq|Gen|Ph\.D|M\.D)\.$"
    )
    .unwrap();
}

/// Items parsed from one field, with the problems met on the way.
#[derive(Debug, Default)]
pub struct ParsedName {
    /// Names, parts and qualifiers in builder order
    pub items: Vec<NameItem>,
    /// Recoverable problems
    pub warnings: Vec<XobisError>,
}

impl ParsedName {
    /// Whether any name or time was found.
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, NameItem::Name { .. } | NameItem::Time(_)))
    }
}

/// Trim ISBD punctuation from a name.
///
/// Strips trailing `, : / ;` (and the Arabic comma) and a final period
/// unless it closes an initial or abbreviation.
///
/// # Examples
///
/// ```
/// use xobis::name_parser::trim_name;
///
/// assert_eq!(trim_name("Smith, John,"), "Smith, John");
/// assert_eq!(trim_name("Anatomy."), "Anatomy");
/// assert_eq!(trim_name("Smith, J."), "Smith, J.");
/// ```
#[must_use]
pub fn trim_name(text: &str) -> String {
    let mut trimmed = text.trim();
    loop {
        let next = trimmed
            .trim_end_matches(|c: char| matches!(c, ',' | '،' | ':' | '/' | ';' | '=') || c.is_whitespace());
        let next = if next.ends_with('.') && !next.ends_with("..") && !ABBREVIATION.is_match(next) {
            next[..next.len() - 1].trim_end()
        } else {
            next
        };
        if next.len() == trimmed.len() {
            break;
        }
        trimmed = next;
    }
    trimmed.to_string()
}

/// Trim a qualifier, dropping enclosing parentheses.
#[must_use]
pub fn trim_qualifier(text: &str) -> String {
    let text = trim_name(text);
    let inner = text.trim_start_matches('(').trim_end_matches(')');
    trim_name(inner)
}

fn nonfiling(field: &Field) -> u32 {
    let indicator = match field.tag.as_str() {
        "130" | "630" | "730" | "740" => field.indicator1,
        "222" | "240" | "242" | "243" | "245" | "440" | "830" => field.indicator2,
        _ => return 0,
    };
    indicator.to_digit(10).unwrap_or(0)
}

fn name_content(text: &str, nonfiling: u32) -> Option<NameContent> {
    let text = trim_name(text);
    if text.is_empty() {
        return None;
    }
    let content = NameContent::new(text);
    Some(if nonfiling > 0 {
        content.with_nonfiling(nonfiling)
    } else {
        content
    })
}

/// Parses heading fields into [`NameItem`]s.
#[derive(Debug, Clone)]
pub struct NameParser<'a> {
    indexer: &'a Indexer,
    config: &'a TransformConfig,
    dates: DateTimeParser<'a>,
}

impl<'a> NameParser<'a> {
    /// A parser that links qualifiers through `indexer`.
    #[must_use]
    pub fn new(indexer: &'a Indexer, config: &'a TransformConfig) -> Self {
        NameParser {
            indexer,
            config,
            dates: DateTimeParser::with_indexer(indexer),
        }
    }

    /// The identity index.
    #[must_use]
    pub fn indexer(&self) -> &'a Indexer {
        self.indexer
    }

    /// The transformation options.
    #[must_use]
    pub fn config(&self) -> &'a TransformConfig {
        self.config
    }

    /// The date parser.
    #[must_use]
    pub fn dates(&self) -> &DateTimeParser<'a> {
        &self.dates
    }

    /// Parse a field as the name of an `element_type` entry.
    #[must_use]
    pub fn parse(&self, field: &Field, element_type: ElementType) -> ParsedName {
        let mut parsed = ParsedName::default();
        match element_type {
            ElementType::Being => self.being(field, &mut parsed),
            ElementType::Organization => self.corporate(field, element_type, 'b', &mut parsed),
            ElementType::Event if field.tag.ends_with("11") => {
                self.corporate(field, element_type, 'e', &mut parsed);
            }
            ElementType::Work => self.work(field, &mut parsed),
            ElementType::Time => self.time(field, &mut parsed),
            ElementType::Object if field.tag == "245" => self.object_title(field, &mut parsed),
            ElementType::Holdings => parsed.warnings.push(XobisError::malformed(
                &field.tag,
                "holdings have no name",
            )),
            _ => self.named(field, &mut parsed),
        }
        if !parsed.has_name() {
            parsed
                .warnings
                .push(XobisError::malformed(&field.tag, format!("no {element_type} name found")));
        }
        parsed
    }

    fn qualifier(&self, text: &str, element_type: ElementType, parsed: &mut ParsedName) {
        let text = trim_qualifier(text);
        if text.is_empty() {
            return;
        }
        match build_simple_ref(&text, element_type, self.indexer) {
            Ok(reference) => parsed.items.push(NameItem::Qualifier(reference)),
            Err(err) => parsed.warnings.push(err),
        }
    }

    fn date_qualifier(&self, text: &str, context: DateContext, tag: &str, parsed: &mut ParsedName) {
        match self.dates.parse(&trim_qualifier(text), context) {
            Ok(time) => parsed.items.push(NameItem::Qualifier(Ref::from(time))),
            Err(err) => parsed
                .warnings
                .push(XobisError::malformed(tag, format!("unusable date qualifier: {err}"))),
        }
    }

    fn being(&self, field: &Field, parsed: &mut ParsedName) {
        let mut qualifiers = ParsedName::default();
        for sf in field.subfields_before('t') {
            match sf.code {
                'a' => parsed.items.extend(being_parts(&sf.value, field.indicator1)),
                'b' | 'c' => {
                    if let Some(content) = name_content(&sf.value, 0) {
                        parsed.items.push(NameItem::part(content, "suffix"));
                    }
                }
                'q' => self.qualifier(&sf.value, ElementType::String, &mut qualifiers),
                'd' => self.date_qualifier(&sf.value, DateContext::Lifespan, &field.tag, &mut qualifiers),
                _ => {}
            }
        }
        parsed.items.append(&mut qualifiers.items);
        parsed.warnings.append(&mut qualifiers.warnings);
    }

    /// Organizations and meetings: all units but the last are prequalifiers,
    /// the first of them a Place for jurisdictions.
    fn corporate(&self, field: &Field, element_type: ElementType, unit_code: char, parsed: &mut ParsedName) {
        let subfields = field.subfields_before('t');
        let units: Vec<&str> = subfields
            .iter()
            .filter(|sf| sf.code == 'a' || sf.code == unit_code)
            .map(|sf| sf.value.as_str())
            .filter(|v| !trim_name(v).is_empty())
            .collect();
        let Some((last, preceding)) = units.split_last() else {
            return;
        };
        for (i, unit) in preceding.iter().enumerate() {
            let prequalifier_type = if i == 0 && field.indicator1 == '1' {
                ElementType::Place
            } else {
                element_type
            };
            self.qualifier(unit, prequalifier_type, parsed);
        }
        if let Some(content) = name_content(last, 0) {
            parsed.items.push(NameItem::name(content));
        }
        for sf in &subfields {
            match sf.code {
                'c' => self.qualifier(&sf.value, ElementType::Place, parsed),
                'd' => self.date_qualifier(&sf.value, DateContext::General, &field.tag, parsed),
                'n' => self.qualifier(&sf.value, ElementType::String, parsed),
                _ => {}
            }
        }
    }

    fn named(&self, field: &Field, parsed: &mut ParsedName) {
        let mut has_name = false;
        for sf in field.subfields_before('t') {
            match sf.code {
                'a' | 'x' | 'v' | 'y' | 'z' if !has_name => {
                    if let Some(content) = name_content(&sf.value, nonfiling(field)) {
                        parsed.items.push(NameItem::name(content));
                        has_name = true;
                    }
                }
                'x' | 'v' => self.qualifier(&sf.value, ElementType::Concept, parsed),
                'y' => self.date_qualifier(&sf.value, DateContext::General, &field.tag, parsed),
                'z' => self.qualifier(&sf.value, ElementType::Place, parsed),
                _ => {}
            }
        }
    }

    fn object_title(&self, field: &Field, parsed: &mut ParsedName) {
        let text = field
            .subfields()
            .filter(|sf| matches!(sf.code, 'a' | 'b' | 'n' | 'p'))
            .map(|sf| trim_name(&sf.value))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(content) = name_content(&text, nonfiling(field)) {
            parsed.items.push(NameItem::name(content));
        }
    }

    fn work(&self, field: &Field, parsed: &mut ParsedName) {
        let name_title = field.has_subfield('t')
            && (matches!(field.tag.get(1..), Some("00" | "10" | "11")) || is_linking_entry(&field.tag));
        let title: Vec<&Subfield> = if name_title {
            self.author_qualifier(field, parsed);
            field.subfields_from('t')
        } else {
            field.subfields().collect()
        };

        let mut skip = if name_title { 0 } else { nonfiling(field) };
        let mut qualifiers = ParsedName::default();
        for sf in title {
            let part = match sf.code {
                'a' | 't' => "generic",
                'b' => "subtitle",
                'n' | 'p' => "section",
                'l' => {
                    self.qualifier(&sf.value, ElementType::Language, &mut qualifiers);
                    continue;
                }
                'd' | 'f' => {
                    self.date_qualifier(&sf.value, DateContext::General, &field.tag, &mut qualifiers);
                    continue;
                }
                's' => {
                    self.qualifier(&sf.value, ElementType::String, &mut qualifiers);
                    continue;
                }
                'k' => {
                    self.qualifier(&sf.value, ElementType::Concept, &mut qualifiers);
                    continue;
                }
                _ => continue,
            };
            if let Some(content) = name_content(&sf.value, skip) {
                parsed.items.push(NameItem::part(content, part));
                skip = 0;
            }
        }
        parsed.items.append(&mut qualifiers.items);
        parsed.warnings.append(&mut qualifiers.warnings);
    }

    /// The name portion of a name/title heading, as a linked qualifier.
    fn author_qualifier(&self, field: &Field, parsed: &mut ParsedName) {
        let before = field.subfields_before('t');
        if before.iter().all(|sf| !matches!(sf.code, 'a' | 'b' | 'c' | 'd' | 'q')) {
            return;
        }
        let mut portion = Field::new(field.tag.clone(), field.indicator1, field.indicator2);
        portion.subfields = before.into_iter().cloned().collect();
        let element_type = match heading_element_type(&portion) {
            Some(element_type) if element_type != ElementType::Work => element_type,
            _ => {
                let text = trim_name(&portion.join_subfields(&['a']));
                self.indexer
                    .resolve_element_type(&text, &[ElementType::Being, ElementType::Organization, ElementType::Event])
                    .unwrap_or(ElementType::Being)
            }
        };
        match self.build_ref(&portion, element_type) {
            Ok((reference, warnings)) => {
                parsed.items.push(NameItem::Qualifier(reference));
                parsed.warnings.extend(warnings);
            }
            Err(err) => parsed.warnings.push(err),
        }
    }

    fn time(&self, field: &Field, parsed: &mut ParsedName) {
        let text = match field.get_subfield('a') {
            Some(a) => a.to_string(),
            None => field.join_subfields(&['y']),
        };
        match self.dates.parse(&text, DateContext::General) {
            Ok(time) => parsed.items.push(NameItem::Time(time)),
            Err(err) => parsed.warnings.push(err),
        }
    }

    /// Build a ref to the entity a field names.
    ///
    /// See [`build_ref_from_field`](crate::builders::reference::build_ref_from_field).
    ///
    /// # Errors
    ///
    /// Fails when the field yields no usable entry.
    pub fn build_ref(&self, field: &Field, element_type: ElementType) -> crate::Result<(Ref, Vec<XobisError>)> {
        crate::builders::reference::build_ref_from_field(field, element_type, self)
    }
}

/// Split a personal name `$a`: surname and forename when the first
/// indicator is 1, else a single generic name.
fn being_parts(value: &str, indicator1: char) -> Vec<NameItem> {
    let value = trim_name(value);
    if value.is_empty() {
        return Vec::new();
    }
    if indicator1 != '1' {
        return vec![NameItem::part(NameContent::new(value), "generic")];
    }
    match value.split_once([',', '،']) {
        Some((surname, given)) => {
            let mut parts = Vec::new();
            if let Some(surname) = name_content(surname, 0) {
                parts.push(NameItem::part(surname, "surname"));
            }
            if let Some(given) = name_content(given, 0) {
                parts.push(NameItem::part(given, "given"));
            }
            parts
        }
        None => vec![NameItem::part(NameContent::new(value), "surname")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::EntryBuilder;
    use crate::xobis::{BeingPart, Name, WorkPart};

    fn parse(field: &Field, element_type: ElementType) -> ParsedName {
        let indexer = Indexer::new();
        let config = TransformConfig::default();
        NameParser::new(&indexer, &config).parse(field, element_type)
    }

    fn names(parsed: &ParsedName) -> Vec<(String, Option<&'static str>)> {
        parsed
            .items
            .iter()
            .filter_map(|item| match item {
                NameItem::Name { content, part_type } => Some((content.text.clone(), *part_type)),
                _ => None,
            })
            .collect()
    }

    fn qualifier_types(parsed: &ParsedName) -> Vec<ElementType> {
        parsed
            .items
            .iter()
            .filter_map(|item| match item {
                NameItem::Qualifier(r) => Some(r.element_type()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_trim_name() {
        assert_eq!(trim_name("Smith, John,"), "Smith, John");
        assert_eq!(trim_name("Anatomy."), "Anatomy");
        assert_eq!(trim_name("Smith, J."), "Smith, J.");
        assert_eq!(trim_name("Jones, Bob, Jr."), "Jones, Bob, Jr.");
        assert_eq!(trim_name("Washington, D.C."), "Washington, D.C.");
        assert_eq!(trim_name("The title :"), "The title");
        assert_eq!(trim_name("Title /"), "Title");
        assert_eq!(trim_name("Ends..."), "Ends...");
        assert_eq!(trim_qualifier("(2nd :"), "2nd");
    }

    #[test]
    fn test_inverted_personal_name() {
        let field = Field::from_pairs("100", '1', ' ', &[('a', "Smith, John,"), ('d', "1900-1980.")]);
        let parsed = parse(&field, ElementType::Being);
        assert_eq!(
            names(&parsed),
            vec![("Smith".to_string(), Some("surname")), ("John".to_string(), Some("given"))]
        );
        assert_eq!(qualifier_types(&parsed), vec![ElementType::Time]);
        assert!(parsed.warnings.is_empty());

        let mut entry = EntryBuilder::new(ElementType::Being);
        entry.add_items(parsed.items).unwrap();
        let content = entry.build_being().unwrap();
        assert_eq!(content.name.part_types(), vec![BeingPart::Surname, BeingPart::Given]);
        assert!(content.time.is_none());
    }

    #[test]
    fn test_direct_order_name_is_generic() {
        let field = Field::from_pairs("100", '0', ' ', &[('a', "Homer."), ('c', "(Greek poet)")]);
        let parsed = parse(&field, ElementType::Being);
        let mut entry = EntryBuilder::new(ElementType::Being);
        entry.add_items(parsed.items).unwrap();
        let content = entry.build_being().unwrap();
        assert_eq!(content.name.part_types(), vec![BeingPart::Generic, BeingPart::Suffix]);
    }

    #[test]
    fn test_organization_prequalifiers() {
        let field = Field::from_pairs(
            "110",
            '1',
            ' ',
            &[('a', "United States."), ('b', "Congress."), ('b', "Senate.")],
        );
        let parsed = parse(&field, ElementType::Organization);
        let mut entry = EntryBuilder::new(ElementType::Organization);
        entry.add_items(parsed.items).unwrap();
        let content = entry.build_prequalified().unwrap();
        assert_eq!(content.name.text, "Senate");
        let types: Vec<ElementType> = content.prequalifiers.iter().map(Ref::element_type).collect();
        assert_eq!(types, vec![ElementType::Place, ElementType::Organization]);
    }

    #[test]
    fn test_meeting_qualifiers() {
        let field = Field::from_pairs(
            "111",
            '2',
            ' ',
            &[('a', "Symposium on Anatomy"), ('n', "(2nd :"), ('d', "1999 :"), ('c', "Stanford, Calif.)")],
        );
        let parsed = parse(&field, ElementType::Event);
        assert_eq!(names(&parsed), vec![("Symposium on Anatomy".to_string(), None)]);
        assert_eq!(
            qualifier_types(&parsed),
            vec![ElementType::String, ElementType::Time, ElementType::Place]
        );
    }

    #[test]
    fn test_subject_subdivisions() {
        let field = Field::from_pairs(
            "650",
            ' ',
            '2',
            &[('a', "Anatomy"), ('x', "history"), ('z', "France"), ('y', "19th century")],
        );
        let parsed = parse(&field, ElementType::Concept);
        assert_eq!(names(&parsed), vec![("Anatomy".to_string(), None)]);
        assert_eq!(qualifier_types(&parsed)[..2], [ElementType::Concept, ElementType::Place]);
    }

    #[test]
    fn test_subdivision_heading_takes_first_subfield() {
        let field = Field::from_pairs("180", ' ', ' ', &[('x', "history")]);
        let parsed = parse(&field, ElementType::Concept);
        assert_eq!(names(&parsed), vec![("history".to_string(), None)]);
    }

    #[test]
    fn test_title_parts_and_nonfiling() {
        let field = Field::from_pairs(
            "245",
            '1',
            '4',
            &[('a', "The anatomy of the body :"), ('b', "a study /"), ('n', "Part 2."), ('c', "by J. Smith.")],
        );
        let parsed = parse(&field, ElementType::Work);
        let mut entry = EntryBuilder::new(ElementType::Work);
        entry.add_items(parsed.items.clone()).unwrap();
        let content = entry.build_work().unwrap();
        assert_eq!(
            content.name.part_types(),
            vec![WorkPart::Generic, WorkPart::Subtitle, WorkPart::Section]
        );
        let Name::Parts(parts) = content.name else {
            panic!("expected parts");
        };
        assert_eq!(parts[0].content.nonfiling, 4);
        assert_eq!(parts[0].content.text, "The anatomy of the body");
    }

    #[test]
    fn test_name_title_author_becomes_qualifier() {
        let field = Field::from_pairs(
            "700",
            '1',
            '2',
            &[('a', "Shakespeare, William,"), ('d', "1564-1616."), ('t', "Hamlet."), ('l', "French.")],
        );
        let parsed = parse(&field, ElementType::Work);
        assert_eq!(names(&parsed), vec![("Hamlet".to_string(), Some("generic"))]);
        assert_eq!(qualifier_types(&parsed), vec![ElementType::Being, ElementType::Language]);
    }

    #[test]
    fn test_time_heading() {
        let field = Field::from_pairs("148", ' ', ' ', &[('a', "1914-1918")]);
        let parsed = parse(&field, ElementType::Time);
        assert!(matches!(parsed.items.as_slice(), [NameItem::Time(t)] if t.is_duration()));
    }

    #[test]
    fn test_missing_name_warns() {
        let field = Field::from_pairs("100", '1', ' ', &[('d', "1900-")]);
        let parsed = parse(&field, ElementType::Being);
        assert!(!parsed.has_name());
        assert!(parsed
            .warnings
            .iter()
            .any(|w| matches!(w, XobisError::MalformedField { tag, .. } if tag == "100")));
    }

    #[test]
    fn test_bad_date_qualifier_warns() {
        let field = Field::from_pairs("100", '1', ' ', &[('a', "Smith, John,"), ('d', "--")]);
        let parsed = parse(&field, ElementType::Being);
        assert!(parsed.has_name());
        assert_eq!(parsed.warnings.len(), 1);
    }
}
