//! MARC preprocessing.
//!
//! Every pass rewrites a cloned record in place and never fails: problems
//! come back as warnings for the record's diagnostics.
//!
//! - 880 juggling: vernacular fields move under the tag whose role they play.
//! - 68X splitting: a 680 or 681 with several `$i` becomes one field per `$i`.
//! - Sumption propagation across variants that share an entry group.
//! - 94X rewriting into 650/651 subject-style fields with a relator.
//! - Series resolution between 490, 830 and 901.

use crate::element_type::ElementType;
use crate::error::XobisError;
use crate::field_linkage::juggle_880;
use crate::indexer::normalize;
use crate::leader::RecordKind;
use crate::name_parser::trim_name;
use crate::record::{Field, Record};
use crate::tables::relator_code;
use crate::transform::variants::{entry_group, includes_marker};
use std::collections::{HashMap, HashSet};

/// Run every pass that applies to a record of `element_type`.
#[must_use]
pub fn preprocess(record: &Record, element_type: ElementType) -> (Record, Vec<XobisError>) {
    let mut record = record.clone();
    let mut warnings = Vec::new();

    juggle_880s(&mut record);
    if record.leader.kind() == RecordKind::Authority {
        split_68x(&mut record);
        if element_type.is_concept_family() {
            propagate_sumption(&mut record);
        }
    }
    if matches!(element_type, ElementType::Work | ElementType::Object)
        && record.leader.kind() == RecordKind::Bibliographic
    {
        warnings.extend(rewrite_94x(&mut record));
        warnings.extend(resolve_series(&mut record));
    }
    (record, warnings)
}

/// Rewrite every 880 under its linked tag.
pub fn juggle_880s(record: &mut Record) {
    record.flat_map_fields(|field| vec![juggle_880(&field)]);
}

/// Split each 680/681 at every `$i`.
///
/// Subfields before the first `$i` stay with the first piece.
pub fn split_68x(record: &mut Record) {
    record.flat_map_fields(|field| {
        if !matches!(field.tag.as_str(), "680" | "681") || field.get_subfield_values('i').len() < 2 {
            return vec![field];
        }
        let mut pieces: Vec<Field> = Vec::new();
        let mut current = Field::new(field.tag.clone(), field.indicator1, field.indicator2);
        for sf in field.subfields() {
            if sf.code == 'i' && current.has_subfield('i') {
                let next = Field::new(field.tag.clone(), field.indicator1, field.indicator2);
                pieces.push(std::mem::replace(&mut current, next));
            }
            current.add_subfield(sf.code, sf.value.clone());
        }
        pieces.push(current);
        pieces
    });
}

/// Copy an `includes` relator to every variant of its entry group.
pub fn propagate_sumption(record: &mut Record) {
    let is_variant = |field: &Field| field.tag.starts_with('4');
    let group_of = |field: &Field| {
        field
            .get_subfield('8')
            .and_then(|value| entry_group(value).group)
    };
    let marker_of = |field: &Field| {
        field
            .get_subfield_values(relator_code(&field.tag))
            .into_iter()
            .find(|value| includes_marker(value).is_some())
            .map(trim_name)
    };

    let mut markers: HashMap<String, String> = HashMap::new();
    for field in record.fields() {
        if !is_variant(field) {
            continue;
        }
        if let (Some(group), Some(marker)) = (group_of(field), marker_of(field)) {
            markers.entry(group).or_insert(marker);
        }
    }
    if markers.is_empty() {
        return;
    }
    for field in record.fields_mut() {
        let view: &Field = field;
        if !is_variant(view) || marker_of(view).is_some() {
            continue;
        }
        let Some(marker) = group_of(view).and_then(|group| markers.get(&group)) else {
            continue;
        };
        let code = relator_code(&field.tag);
        field.add_subfield(code, marker.clone());
    }
}

/// Rewrite 941 (place), 942 (language) and 943 (date) as relationship
/// fields: 651 27, 650 26 and 650 25 carrying their relator in `$e`.
///
/// 943 dates come from 008/07-14 and the date type in 008/06.
pub fn rewrite_94x(record: &mut Record) -> Vec<XobisError> {
    let place_relator = if record.leader.is_unpublished() {
        "Place of production"
    } else {
        "Place of publication"
    };
    let language_relator = if record.leader.is_language_material() {
        "Language of text"
    } else {
        "Language"
    };
    let date_type = record.fixed_field_byte(6);
    let date1 = record.fixed_field_slice(7, 11);
    let date2 = record.fixed_field_slice(11, 15);

    let mut warnings = Vec::new();
    record.flat_map_fields(|field| match field.tag.as_str() {
        "941" => vec![with_relator(&field, "651", '7', place_relator)],
        "942" => vec![with_relator(&field, "650", '6', language_relator)],
        "943" => match date_entries(date_type, date1.as_deref(), date2.as_deref()) {
            Ok(entries) => entries
                .into_iter()
                .map(|(relator, date)| {
                    Field::from_pairs("650", '2', '5', &[('a', date.as_str()), ('e', relator)])
                })
                .collect(),
            Err(err) => {
                warnings.push(err);
                Vec::new()
            }
        },
        _ => vec![field],
    });
    warnings
}

fn with_relator(field: &Field, tag: &str, indicator2: char, relator: &str) -> Field {
    let mut rewritten = field.retagged(tag);
    rewritten.indicator1 = '2';
    rewritten.indicator2 = indicator2;
    rewritten.remove_subfields('e');
    rewritten.add_subfield('e', relator);
    rewritten
}

/// Clean one 008 date: `u` digits become placeholders, blanks and fill
/// characters mean no date.
fn fixed_date(date: Option<&str>) -> Option<String> {
    let date = date?.trim();
    if date.is_empty() || date.chars().all(|c| c == '|' || c == '#') {
        return None;
    }
    Some(date.replace(['u', 'U'], "-"))
}

/// Relators and date strings for a 943, by 008 date type.
fn date_entries(
    date_type: Option<char>,
    date1: Option<&str>,
    date2: Option<&str>,
) -> Result<Vec<(&'static str, String)>, XobisError> {
    let date1 = fixed_date(date1);
    let date2 = fixed_date(date2).filter(|d| d != "9999");
    let missing = || XobisError::malformed("943", "008 carries no usable date");
    let first = || date1.clone().ok_or_else(missing);
    let range = || -> Result<String, XobisError> {
        let start = first()?;
        Ok(match &date2 {
            Some(end) => format!("{start}-{end}"),
            None => format!("{start}-"),
        })
    };

    let entries = match date_type {
        Some('b') => vec![("Published", "Ancient".to_string())],
        Some('n' | '|') | None => vec![("Published", "Unknown".to_string())],
        Some('e' | 's') => vec![("Published", first()?)],
        Some('q') => match &date2 {
            Some(_) => vec![("Published", format!("approximately {}", range()?))],
            None => vec![("Published", format!("approximately {}", first()?))],
        },
        Some('c') => vec![("Published", format!("{}-", first()?))],
        Some('d' | 'm') => vec![("Published", range()?)],
        Some('u') => vec![("Published", format!("{}-Unknown", first()?))],
        Some('i') => vec![("Inclusive", range()?)],
        Some('k') => vec![("Bulk", range()?)],
        Some(pair @ ('p' | 'r' | 't')) => {
            let (relator1, relator2) = match pair {
                'p' => ("Distributed", "Produced"),
                'r' => ("Reprinted", "Originally"),
                _ => ("Published", "Copyright"),
            };
            let entries: Vec<_> = [(relator1, date1.clone()), (relator2, date2.clone())]
                .into_iter()
                .filter_map(|(relator, date)| date.map(|d| (relator, d)))
                .collect();
            if entries.is_empty() {
                return Err(missing());
            }
            entries
        }
        Some(other) => {
            return Err(XobisError::malformed(
                "943",
                format!("unknown 008 date type {other:?}"),
            ))
        }
    };
    Ok(entries)
}

/// Matching key of a series field: `$a` and the title subfields after it,
/// normalized.
///
/// `$q`, `$n` and `$p` never count, nor do volume (`$v`), ISSN (`$x`),
/// record link (`$w`) and numeric subfields. A 490 `$l` is a call number and
/// a 901 `$d` a volume date, so those are left out too.
fn series_key(field: &Field) -> String {
    let skipped: &[char] = match field.tag.as_str() {
        "490" => &['l'],
        "901" => &['d'],
        _ => &[],
    };
    let values: Vec<&str> = field
        .subfields()
        .skip_while(|sf| sf.code != 'a')
        .filter(|sf| {
            sf.code.is_ascii_lowercase()
                && !matches!(sf.code, 'q' | 'n' | 'p' | 'v' | 'x' | 'w')
                && !skipped.contains(&sf.code)
        })
        .map(|sf| sf.value.as_str())
        .collect();
    normalize(&values.join(" "))
}

/// Align 490 and 901 series statements with traced 830s.
///
/// A 490 matching exactly one 830 is folded into it as a `$1` note; other
/// 490s stay put and end up as record-level notes. A 901 matching exactly
/// one 830 replaces it with one 830 per `$v` volume, each following `$d`
/// becoming that volume's `$7` date.
pub fn resolve_series(record: &mut Record) -> Vec<XobisError> {
    let keys: Vec<Option<String>> = record
        .fields()
        .map(|f| (f.tag == "830").then(|| series_key(f)))
        .collect();
    let matching = |key: &str| -> Vec<usize> {
        keys.iter()
            .enumerate()
            .filter(|(_, k)| k.as_deref() == Some(key))
            .map(|(i, _)| i)
            .collect()
    };

    let mut warnings = Vec::new();
    let mut resolved: HashSet<usize> = HashSet::new();
    let mut notes: HashMap<usize, Vec<String>> = HashMap::new();
    let mut volumes: HashMap<usize, Vec<(String, Option<String>)>> = HashMap::new();

    for (i, field) in record.fields().enumerate() {
        match field.tag.as_str() {
            "490" => match matching(&series_key(field)).as_slice() {
                [target] => {
                    notes
                        .entry(*target)
                        .or_default()
                        .push(field.join_subfields(&['a', 'v']));
                    resolved.insert(i);
                }
                [] => {}
                _ => warnings.push(XobisError::malformed("490", "series matches several 830s")),
            },
            "901" => {
                resolved.insert(i);
                match matching(&series_key(field)).as_slice() {
                    [target] => volumes.entry(*target).or_default().extend(series_volumes(field)),
                    _ => warnings.push(XobisError::malformed("901", "no single 830 for this series")),
                }
            }
            _ => {}
        }
    }

    let old = std::mem::take(&mut record.fields);
    for (i, mut field) in old.into_iter().enumerate() {
        if resolved.contains(&i) {
            continue;
        }
        for note in notes.remove(&i).unwrap_or_default() {
            field.add_subfield('1', note);
        }
        match volumes.remove(&i) {
            Some(list) if !list.is_empty() => {
                for (volume, date) in list {
                    let mut copy = field.clone();
                    copy.set_subfield('v', volume);
                    if let Some(date) = date {
                        copy.set_subfield('7', date);
                    }
                    record.fields.push(copy);
                }
            }
            _ => record.fields.push(field),
        }
    }
    warnings
}

/// `$v` volumes of a 901, each with the `$d` that follows it.
fn series_volumes(field: &Field) -> Vec<(String, Option<String>)> {
    let mut list: Vec<(String, Option<String>)> = Vec::new();
    for sf in field.subfields() {
        match sf.code {
            'v' => list.push((sf.value.trim().to_string(), None)),
            'd' => {
                if let Some(last) = list.last_mut() {
                    last.1 = Some(sf.value.trim().to_string());
                }
            }
            _ => {}
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leader::Leader;

    fn bib(fixed: &str, fields: Vec<Field>) -> Record {
        let mut record = Record::builder(Leader::bibliographic('a', 'm'))
            .control_field("001", "1")
            .control_field("008", fixed)
            .build();
        for field in fields {
            record.add_field(field);
        }
        record
    }

    #[test]
    fn test_split_68x() {
        let mut record = Record::builder(Leader::authority())
            .field(Field::from_pairs(
                "680",
                ' ',
                ' ',
                &[('i', "First."), ('a', "Anatomy"), ('i', "Second.")],
            ))
            .build();
        split_68x(&mut record);
        let pieces: Vec<_> = record.fields_by_tag("680").collect();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].join_subfields(&['i', 'a']), "First. Anatomy");
        assert_eq!(pieces[1].get_subfield('i'), Some("Second."));
    }

    #[test]
    fn test_sumption_propagates_within_group() {
        let mut record = Record::builder(Leader::authority())
            .field(Field::from_pairs("150", ' ', ' ', &[('a', "Heart")]))
            .field(Field::from_pairs("450", ' ', ' ', &[('a', "Cardiac"), ('8', "1"), ('e', "includes broader")]))
            .field(Field::from_pairs("450", ' ', ' ', &[('a', "Cor"), ('8', "1.2")]))
            .field(Field::from_pairs("450", ' ', ' ', &[('a', "Coeur"), ('8', "2")]))
            .build();
        propagate_sumption(&mut record);
        let variants: Vec<_> = record.fields_by_tag("450").collect();
        assert_eq!(variants[1].get_subfield('e'), Some("includes broader"));
        assert_eq!(variants[2].get_subfield('e'), None);
    }

    #[test]
    fn test_943_two_entries() {
        let mut record = bib(
            "850101p19901985xx",
            vec![Field::from_pairs("943", ' ', ' ', &[('a', "date")])],
        );
        assert!(rewrite_94x(&mut record).is_empty());
        let fields: Vec<_> = record.fields_by_tag("650").collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].get_subfield('a'), Some("1990"));
        assert_eq!(fields[0].get_subfield('e'), Some("Distributed"));
        assert_eq!(fields[1].get_subfield('a'), Some("1985"));
        assert_eq!(fields[1].get_subfield('e'), Some("Produced"));
        assert_eq!((fields[0].indicator1, fields[0].indicator2), ('2', '5'));
    }

    #[test]
    fn test_943_open_range_and_placeholders() {
        let entries = date_entries(Some('c'), Some("1990"), Some("9999")).unwrap();
        assert_eq!(entries, vec![("Published", "1990-".to_string())]);
        let entries = date_entries(Some('s'), Some("19uu"), None).unwrap();
        assert_eq!(entries, vec![("Published", "19--".to_string())]);
        assert!(date_entries(Some('s'), Some("    "), None).is_err());
    }

    #[test]
    fn test_941_942_rewrites() {
        let mut record = bib(
            "850101s1990",
            vec![
                Field::from_pairs("941", ' ', ' ', &[('a', "Paris")]),
                Field::from_pairs("942", ' ', ' ', &[('a', "French")]),
            ],
        );
        rewrite_94x(&mut record);
        let place = record.get_field("651").unwrap();
        assert_eq!(place.get_subfield('e'), Some("Place of publication"));
        let language = record.get_field("650").unwrap();
        assert_eq!(language.indicator2, '6');
        assert_eq!(language.get_subfield('e'), Some("Language of text"));
    }

    #[test]
    fn test_series_resolution() {
        let mut record = bib(
            "",
            vec![
                Field::from_pairs("490", '1', ' ', &[('a', "Methods in enzymology ;"), ('v', "v. 12")]),
                Field::from_pairs("490", '0', ' ', &[('a', "Untraced series")]),
                Field::from_pairs("830", ' ', '0', &[('a', "Methods in enzymology."), ('v', "v. 12")]),
            ],
        );
        assert!(resolve_series(&mut record).is_empty());
        let untraced: Vec<_> = record.fields_by_tag("490").collect();
        assert_eq!(untraced.len(), 1);
        assert_eq!(untraced[0].get_subfield('a'), Some("Untraced series"));
        let series = record.get_field("830").unwrap();
        assert_eq!(series.get_subfield('1'), Some("Methods in enzymology ; v. 12"));
    }

    #[test]
    fn test_series_key_reads_title_subfields() {
        let plain = Field::from_pairs("830", ' ', '0', &[('a', "Methods."), ('v', "v. 3")]);
        let version = Field::from_pairs("830", ' ', '0', &[('a', "Methods."), ('s', "English.")]);
        let parts = Field::from_pairs("830", ' ', '0', &[('a', "Methods."), ('n', "Part 2."), ('p', "Cells.")]);
        assert_eq!(series_key(&plain), "methods");
        assert_eq!(series_key(&version), "methods english");
        assert_eq!(series_key(&parts), "methods");
    }

    #[test]
    fn test_series_resolution_tells_830s_apart_after_a() {
        let mut record = bib(
            "",
            vec![
                Field::from_pairs("490", '1', ' ', &[('a', "Methods ;"), ('v', "v. 3")]),
                Field::from_pairs("830", ' ', '0', &[('a', "Methods."), ('v', "v. 3")]),
                Field::from_pairs("830", ' ', '0', &[('a', "Methods."), ('s', "English.")]),
            ],
        );
        assert!(resolve_series(&mut record).is_empty());
        assert!(record.get_field("490").is_none());
        let series: Vec<_> = record.fields_by_tag("830").collect();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].get_subfield('1'), Some("Methods ; v. 3"));
        assert!(!series[1].has_subfield('1'));
    }

    #[test]
    fn test_901_expands_volumes() {
        let mut record = bib(
            "",
            vec![
                Field::from_pairs("830", ' ', '0', &[('a', "Annual review.")]),
                Field::from_pairs(
                    "901",
                    ' ',
                    ' ',
                    &[('a', "Annual review"), ('v', "1"), ('d', "1990"), ('v', "2")],
                ),
            ],
        );
        resolve_series(&mut record);
        let series: Vec<_> = record.fields_by_tag("830").collect();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].get_subfield('7'), Some("1990"));
        assert_eq!(series[1].get_subfield('v'), Some("2"));
        assert!(record.get_field("901").is_none());
    }
}
