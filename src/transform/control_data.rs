//! Control data: identifier, alternate identifiers, record types, actions.

use super::RecordTransform;
use crate::builders::{build_simple_ref, RecordBuilder};
use crate::datetime::DateContext;
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::leader::RecordKind;
use crate::record::{Field, Record as MarcRecord};
use crate::tables::{created_action, heading_equivalent, ALTERNATE_ID_RULES};
use crate::xobis::{IdContent, IdDescription, IdStatus, IdStatusKind};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 035 value with a parenthesized source prefix, e.g. `(OCoLC)12345`.
    static ref PREFIXED_ID: Regex = Regex::new(r"^\(([^)]+)\)\s*(.+)$").unwrap();
}

const SUBSET: &str = "Subset";
const ACTION_TYPE: &str = "Action Type";

impl RecordTransform<'_> {
    pub(super) fn control_data(&mut self, record: &MarcRecord, builder: &mut RecordBuilder) -> Result<()> {
        builder.set_id(self.record_id(record)?);
        for alternate in self.alternates(record)? {
            builder.add_alternate(alternate);
        }
        for value in self.record_types(record) {
            builder.add_type(self.generic_type(&value, SUBSET)?);
        }
        for (action, date) in self.actions(record) {
            match self.parser.dates().parse(&date, DateContext::General) {
                Ok(time) => {
                    builder.add_action(self.generic_type(&action, ACTION_TYPE)?, time);
                }
                Err(err) => self.recover(None, err)?,
            }
        }
        Ok(())
    }

    /// The record's own identifier, described by the institution.
    fn record_id(&self, record: &MarcRecord) -> Result<IdContent> {
        let local = match (record.control_number(), self.kind) {
            (Some(local), _) if !local.is_empty() => local.to_string(),
            (_, RecordKind::Holdings) => record
                .get_control_field("004")
                .map(|linked| linked.trim().to_string())
                .filter(|linked| !linked.is_empty())
                .ok_or_else(|| XobisError::Invariant("holdings record has neither 001 nor 004".into()))?,
            _ => return Err(XobisError::Invariant("record has no control number".into())),
        };
        let institution = build_simple_ref(
            &self.config().institution_name,
            ElementType::Organization,
            self.indexer(),
        )?;
        IdContent::new(
            Some(IdStatus::plain(IdStatusKind::Valid)),
            vec![IdDescription::Ref(Box::new(institution))],
            self.config().control_number(self.kind, &local),
        )
    }

    /// Alternate identifiers in field order.
    fn alternates(&self, record: &MarcRecord) -> Result<Vec<IdContent>> {
        let mut alternates = Vec::new();
        for field in record.fields() {
            if field.tag == "035" {
                alternates.extend(system_numbers(field)?);
                continue;
            }
            if self.is_authority() && is_heading_link(&field.tag) {
                if let Some(id) = heading_equivalent_id(field)? {
                    alternates.push(id);
                }
                continue;
            }
            for sf in field.subfields() {
                let rule = ALTERNATE_ID_RULES
                    .iter()
                    .find(|rule| rule.tag == field.tag && rule.code == sf.code);
                let value = sf.value.trim();
                if let Some(rule) = rule.filter(|_| !value.is_empty()) {
                    alternates.push(IdContent::new(
                        Some(IdStatus::plain(rule.status)),
                        vec![IdDescription::Text(rule.description.to_string())],
                        value,
                    )?);
                }
            }
        }
        Ok(alternates)
    }

    /// Subset names: 655 77, 903, 906, and 907 for holdings.
    fn record_types(&self, record: &MarcRecord) -> Vec<String> {
        record
            .fields()
            .filter(|field| match field.tag.as_str() {
                "655" => field.indicator1 == '7' && field.indicator2 == '7',
                "903" | "906" => true,
                "907" => self.kind == RecordKind::Holdings,
                _ => false,
            })
            .flat_map(|field| field.get_subfield_values('a'))
            .map(|value| value.trim().trim_end_matches('.').to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Action types with their ISO dates, in the order 005, 008, 915, 989.
    fn actions(&self, record: &MarcRecord) -> Vec<(String, String)> {
        let mut actions = Vec::new();
        if let Some(revised) = record.get_control_field("005").and_then(transaction_date) {
            actions.push(("Lane revised".to_string(), revised));
        }
        if let Some(created) = record.fixed_field_slice(0, 6).and_then(|d| entered_date(&d)) {
            let action = created_action(record.cataloging_source());
            actions.push((action.to_string(), created));
        }
        for field in record.fields_by_tag("915") {
            if let (Some(action), Some(date)) = (field.get_subfield('a'), field.get_subfield('b')) {
                actions.push((action.trim().to_string(), date.trim().to_string()));
            }
        }
        if self.kind == RecordKind::Holdings {
            for date in record.get_subfields("989", &['a']) {
                actions.push(("Batch imported".to_string(), date.trim().to_string()));
            }
        }
        actions
    }
}

fn is_heading_link(tag: &str) -> bool {
    matches!(tag.parse::<u16>(), Ok(700..=785))
}

/// LC or NLM established-heading equivalent from an authority 7XX.
fn heading_equivalent_id(field: &Field) -> Result<Option<IdContent>> {
    let Some(description) = heading_equivalent(field.indicator2) else {
        return Ok(None);
    };
    let value = match field.get_subfield('0') {
        Some(number) if !number.trim().is_empty() => number.trim().to_string(),
        _ => field
            .subfields()
            .filter(|sf| sf.code.is_ascii_alphabetic())
            .map(|sf| sf.value.trim())
            .collect::<Vec<_>>()
            .join(" "),
    };
    if value.is_empty() {
        return Ok(None);
    }
    IdContent::new(
        Some(IdStatus::linking(IdStatusKind::Valid)),
        vec![IdDescription::Text(description.to_string())],
        value,
    )
    .map(Some)
}

/// 035 identifiers, described by their parenthesized prefix.
fn system_numbers(field: &Field) -> Result<Vec<IdContent>> {
    let mut ids = Vec::new();
    for sf in field.subfields() {
        let status = match sf.code {
            'a' => IdStatusKind::Valid,
            'z' => IdStatusKind::Cancelled,
            _ => continue,
        };
        let value = sf.value.trim();
        if value.is_empty() {
            continue;
        }
        let (description, number) = match PREFIXED_ID.captures(value) {
            Some(caps) => (caps[1].to_string(), caps[2].trim().to_string()),
            None => ("System Control Number".to_string(), value.to_string()),
        };
        ids.push(IdContent::new(
            Some(IdStatus::plain(status)),
            vec![IdDescription::Text(description)],
            number,
        )?);
    }
    Ok(ids)
}

/// 005 `yyyymmddhhmmss.f` as ISO-8601.
fn transaction_date(value: &str) -> Option<String> {
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() < 8 {
        return None;
    }
    let date = format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]);
    if digits.len() >= 14 {
        Some(format!(
            "{date}T{}:{}:{}",
            &digits[8..10],
            &digits[10..12],
            &digits[12..14]
        ))
    } else {
        Some(date)
    }
}

/// 008/00-05 `yymmdd` as ISO-8601, pivoting two-digit years at 60.
fn entered_date(value: &str) -> Option<String> {
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: u32 = value[0..2].parse().ok()?;
    let century = if year < 60 { 2000 } else { 1900 };
    Some(format!("{}-{}-{}", century + year, &value[2..4], &value[4..6]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_date() {
        assert_eq!(
            transaction_date("19940223151047.0").as_deref(),
            Some("1994-02-23T15:10:47")
        );
        assert_eq!(transaction_date("20200101").as_deref(), Some("2020-01-01"));
        assert!(transaction_date("2020").is_none());
    }

    #[test]
    fn test_entered_date_pivot() {
        assert_eq!(entered_date("850101").as_deref(), Some("1985-01-01"));
        assert_eq!(entered_date("120315").as_deref(), Some("2012-03-15"));
        assert!(entered_date("8501").is_none());
    }

    #[test]
    fn test_system_numbers() {
        let field = Field::from_pairs("035", ' ', ' ', &[('a', "(OCoLC)12345"), ('z', "(OCoLC)999")]);
        let ids = system_numbers(&field).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].value, "12345");
        assert_eq!(ids[0].descriptions, vec![IdDescription::Text("OCoLC".into())]);
        assert_eq!(ids[1].status, Some(IdStatus::plain(IdStatusKind::Cancelled)));
    }

    #[test]
    fn test_heading_equivalent() {
        let field = Field::from_pairs("750", ' ', '2', &[('a', "Heart"), ('0', "D006321")]);
        let id = heading_equivalent_id(&field).unwrap().unwrap();
        assert_eq!(id.value, "D006321");
        assert_eq!(id.status, Some(IdStatus::linking(IdStatusKind::Valid)));

        let field = Field::from_pairs("750", ' ', '0', &[('a', "Heart")]);
        assert_eq!(heading_equivalent_id(&field).unwrap().unwrap().value, "Heart");

        let field = Field::from_pairs("750", ' ', '7', &[('a', "Heart")]);
        assert!(heading_equivalent_id(&field).unwrap().is_none());
    }
}
