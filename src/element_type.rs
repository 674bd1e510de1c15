//! Classification of MARC records into XOBIS principal element types.
//!
//! A record's element type is decided by its kind (Leader/06), the tag of its
//! heading field and its broad category: the `$a` of the first 655 with
//! indicators `4` `7`.

use crate::error::{Result, XobisError};
use crate::leader::RecordKind;
use crate::record::{Field, Record};

xobis_vocabulary! {
    /// The ten XOBIS principal elements plus Holdings.
    ElementType, "element type" {
        Being => "being",
        Concept => "concept",
        Event => "event",
        Language => "language",
        Object => "object",
        Organization => "organization",
        Place => "place",
        String => "string",
        Time => "time",
        Work => "work",
        Holdings => "holdings",
    }
}

impl ElementType {
    /// Whether variants of this type may carry an `includes` sumption marker.
    #[must_use]
    pub fn is_concept_family(&self) -> bool {
        matches!(
            self,
            ElementType::Concept | ElementType::Language | ElementType::Place | ElementType::String
        )
    }

    /// Whether refs of this type may appear as prequalifiers.
    #[must_use]
    pub fn can_prequalify(&self) -> bool {
        matches!(
            self,
            ElementType::Event | ElementType::Organization | ElementType::Place
        )
    }
}

/// Broad category of a record: `$a` of the first 655 47.
#[must_use]
pub fn broad_category(record: &Record) -> Option<String> {
    record
        .fields_by_tag("655")
        .find(|f| f.indicator1 == '4' && f.indicator2 == '7')
        .and_then(|f| f.get_subfield('a'))
        .map(|a| a.trim().trim_end_matches('.').to_string())
}

/// Whether the broad category equals `name` or is a subdivision of it
/// (`"Objects"` matches `"Objects, Crafted"`).
#[must_use]
pub fn category_is(category: Option<&str>, name: &str) -> bool {
    category.is_some_and(|c| c == name || c.starts_with(&format!("{name},")))
}

/// The record's heading field: the first 1XX for authorities, 245 for
/// bibliographic records, 852 for holdings.
#[must_use]
pub fn heading_field(record: &Record) -> Option<&Field> {
    match record.leader.kind() {
        RecordKind::Authority => record.fields().find(|f| f.tag.starts_with('1')),
        RecordKind::Bibliographic => record.get_field("245"),
        RecordKind::Holdings => record.get_field("852"),
    }
}

/// Element type of a heading-style field, judged by its last two tag digits.
///
/// Works for 1XX, 4XX, 5XX, 6XX and 7XX alike. X50 headings are Concepts
/// here; only a whole-record classification can refine them by broad
/// category. Returns `None` for tags with no heading role.
#[must_use]
pub fn heading_element_type(field: &Field) -> Option<ElementType> {
    let suffix = field.tag.get(1..)?;
    let with_title = field.has_subfield('t');
    let element = match suffix {
        "00" if with_title => ElementType::Work,
        "10" if with_title => ElementType::Work,
        "11" if with_title => ElementType::Work,
        "00" => ElementType::Being,
        "10" => ElementType::Organization,
        "11" => ElementType::Event,
        "30" | "40" => ElementType::Work,
        "48" | "82" => ElementType::Time,
        "51" | "81" => ElementType::Place,
        "50" | "55" | "53" | "62" | "80" | "85" => ElementType::Concept,
        _ => return None,
    };
    Some(element)
}

/// Classify a record into its XOBIS element type.
///
/// # Errors
///
/// Returns [`XobisError::Unclassifiable`] for an authority record without a
/// 1XX heading.
///
/// # Examples
///
/// ```
/// use xobis::{get_xobis_element_type, ElementType, Field, Leader, Record};
///
/// let record = Record::builder(Leader::authority())
///     .field(Field::from_pairs("100", '1', ' ', &[('a', "Smith, John")]))
///     .build();
/// assert_eq!(get_xobis_element_type(&record).unwrap(), ElementType::Being);
/// ```
pub fn get_xobis_element_type(record: &Record) -> Result<ElementType> {
    let category = broad_category(record);
    let category = category.as_deref();

    match record.leader.kind() {
        RecordKind::Holdings => Ok(ElementType::Holdings),
        RecordKind::Bibliographic => {
            if record.leader.record_type == 'r' || category_is(category, "Objects") {
                Ok(ElementType::Object)
            } else {
                Ok(ElementType::Work)
            }
        }
        RecordKind::Authority => {
            let heading = heading_field(record).ok_or_else(|| {
                XobisError::Unclassifiable(format!(
                    "authority record {} has no 1XX heading",
                    record.control_number().unwrap_or("(no 001)")
                ))
            })?;
            if heading.tag == "150" {
                return Ok(classify_150(category));
            }
            heading_element_type(heading).ok_or_else(|| {
                XobisError::Unclassifiable(format!("unknown heading tag {}", heading.tag))
            })
        }
    }
}

fn classify_150(category: Option<&str>) -> ElementType {
    if category_is(category, "Languages") || category_is(category, "Scripts") {
        ElementType::Language
    } else if category_is(category, "Objects") {
        ElementType::Object
    } else if category_is(category, "Strings") {
        ElementType::String
    } else if category_is(category, "Events") {
        ElementType::Event
    } else if category_is(category, "Organizations") {
        ElementType::Organization
    } else if category_is(category, "Time") {
        ElementType::Time
    } else {
        ElementType::Concept
    }
}
