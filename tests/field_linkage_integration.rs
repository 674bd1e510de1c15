//! Integration tests for 880 (alternate graphic representation) handling

mod common;

use common::{authority, monograph, transform};
use xobis::field_linkage::{juggle_880, LinkageInfo};
use xobis::xobis::PrincipalElement;
use xobis::Field;

/// A bib record with an Arabic 880 title and an 880 added entry.
fn create_linked_record() -> xobis::Record {
    monograph(
        "1",
        vec![
            Field::from_pairs("245", '1', '0', &[('6', "880-01"), ('a', "Kitab ʻan al-hayah /"), ('c', "Smith.")]),
            Field::from_pairs("700", '1', ' ', &[('6', "880-02"), ('a', "Smith, John.")]),
            // Vernacular title
            Field::from_pairs("880", '1', '0', &[('6', "245-01/(3/r"), ('a', "كتاب عن الحياة"), ('c', "سميث")]),
            // Vernacular added entry
            Field::from_pairs("880", '1', ' ', &[('6', "700-02/(3/r"), ('a', "سميث، جون")]),
        ],
    )
}

#[test]
fn test_linkage_target_tags() {
    assert_eq!(LinkageInfo::parse("100-01").unwrap().target_tag(), "400");
    assert_eq!(LinkageInfo::parse("151-03").unwrap().target_tag(), "451");
    assert_eq!(LinkageInfo::parse("245-02").unwrap().target_tag(), "246");
    assert_eq!(LinkageInfo::parse("700-04/(3").unwrap().target_tag(), "700");
}

#[test]
fn test_juggle_title() {
    let field = Field::from_pairs("880", '1', '0', &[('6', "245-01/(3/r"), ('a', "كتاب"), ('c', "سميث")]);
    let juggled = juggle_880(&field);
    assert_eq!(juggled.tag, "246");
    assert!(!juggled.has_subfield('6'));
    assert!(!juggled.has_subfield('c'));
    assert_eq!(juggled.get_subfield('a'), Some("كتاب"));
}

#[test]
fn test_unparseable_linkage_is_kept() {
    let field = Field::from_pairs("880", ' ', ' ', &[('6', "garbage"), ('a', "x")]);
    assert_eq!(juggle_880(&field), field);
}

#[test]
fn test_vernacular_title_becomes_variant() {
    let xobis = transform(&create_linked_record());
    let PrincipalElement::Work(work) = &xobis.element else {
        panic!("expected a work");
    };
    assert_eq!(work.variants.len(), 1);
}

#[test]
fn test_vernacular_added_entry_becomes_relationship() {
    let xobis = transform(&create_linked_record());
    assert_eq!(xobis.relationships.len(), 2);
    let titles: Vec<&str> = xobis
        .relationships
        .iter()
        .filter_map(|r| r.target.link().map(|l| l.title.as_str()))
        .collect();
    assert!(titles.contains(&"سميث، جون"));
}

#[test]
fn test_vernacular_heading_becomes_see_from() {
    let record = authority(
        "1",
        vec![
            Field::from_pairs("100", '1', ' ', &[('6', "880-01"), ('a', "Smith, John")]),
            Field::from_pairs("880", '1', ' ', &[('6', "100-01/(3/r"), ('a', "سميث، جون")]),
        ],
    );
    let xobis = transform(&record);
    let PrincipalElement::Being(being) = &xobis.element else {
        panic!("expected a being");
    };
    assert_eq!(being.variants.len(), 1);
}
