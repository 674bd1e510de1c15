//! Field linkage support for MARC 880 (Alternate Graphical Representation) fields.
//!
//! An 880 carries the vernacular form of another field; its subfield 6 names
//! the tag it pairs with. Before transformation every 880 is rewritten under
//! the tag whose role it plays in XOBIS:
//!
//! - linked to a 1XX heading, it becomes the matching 4XX variant;
//! - linked to 245, it becomes a 246 variant title;
//! - linked to anything else, it becomes a copy under that tag.
//!
//! Subfield 6 format: `TAG-OCC[/SCRIPT][/r]`, e.g. `100-01/(3/r`.

use crate::record::Field;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // TAG = 3-digit field tag, OCC = 2-3 digit occurrence number,
    // SCRIPT = parenthesized or dollar-sign script code, /r = right-to-left
    static ref LINKAGE: Regex =
        Regex::new(r"^(\d{3})-(\d{2,3})(?:/([\(\$][A-Za-z0-9]))?(?:/r)?$").unwrap();
}

/// Information extracted from MARC subfield 6 (Linkage).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageInfo {
    /// The 3-digit field tag from the linkage (e.g., "100", "245")
    pub tag: String,

    /// Occurrence number (01-999) linking fields together
    pub occurrence: String,

    /// Script identification code (e.g., "(2" for Hebrew, "(3" for Arabic)
    pub script_id: String,

    /// Whether reverse script is flagged (after `/r`)
    pub is_reverse: bool,
}

impl LinkageInfo {
    /// Parse a MARC subfield 6 value into linkage information.
    ///
    /// Returns `None` if the value does not match `TAG-OCC[/script][/r]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use xobis::field_linkage::LinkageInfo;
    ///
    /// let info = LinkageInfo::parse("245-02/r").unwrap();
    /// assert_eq!(info.tag, "245");
    /// assert!(info.is_reverse);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let caps = LINKAGE.captures(value)?;

        Some(LinkageInfo {
            tag: caps.get(1)?.as_str().to_string(),
            occurrence: caps.get(2)?.as_str().to_string(),
            script_id: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            is_reverse: value.ends_with("/r"),
        })
    }

    /// The tag an 880 with this linkage should be filed under.
    ///
    /// 1XX headings map to their 4XX see-from counterpart, 245 maps to 246.
    #[must_use]
    pub fn target_tag(&self) -> String {
        if self.tag == "245" {
            return "246".to_string();
        }
        if let Some(rest) = self.tag.strip_prefix('1') {
            return format!("4{rest}");
        }
        self.tag.clone()
    }
}

/// Rewrite an 880 under its linked tag, dropping `$6`.
///
/// Fields that are not 880s, or whose `$6` cannot be parsed, are returned
/// unchanged; an 880 linked to `00` (unpaired, per the `880-00` convention)
/// is kept under the tag it names.
#[must_use]
pub fn juggle_880(field: &Field) -> Field {
    if field.tag != "880" {
        return field.clone();
    }
    let Some(info) = field.get_subfield('6').and_then(LinkageInfo::parse) else {
        return field.clone();
    };
    let mut rewritten = field.retagged(&info.target_tag());
    rewritten.remove_subfields('6');
    if info.tag == "245" {
        // 246 reads title proper from $a; drop the statement of responsibility
        rewritten.remove_subfields('c');
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_linkage() {
        let info = LinkageInfo::parse("100-01").unwrap();
        assert_eq!(info.tag, "100");
        assert_eq!(info.occurrence, "01");
        assert_eq!(info.script_id, "");
        assert!(!info.is_reverse);
    }

    #[test]
    fn test_parse_with_script_and_reverse() {
        let info = LinkageInfo::parse("245-02/(3/r").unwrap();
        assert_eq!(info.tag, "245");
        assert_eq!(info.occurrence, "02");
        assert_eq!(info.script_id, "(3");
        assert!(info.is_reverse);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(LinkageInfo::parse("").is_none());
        assert!(LinkageInfo::parse("10-01").is_none());
        assert!(LinkageInfo::parse("100").is_none());
        assert!(LinkageInfo::parse("abc-01").is_none());
    }

    #[test]
    fn test_target_tags() {
        let target = |s: &str| LinkageInfo::parse(s).unwrap().target_tag();
        assert_eq!(target("100-01"), "400");
        assert_eq!(target("151-01"), "451");
        assert_eq!(target("245-01"), "246");
        assert_eq!(target("700-03"), "700");
        assert_eq!(target("650-03"), "650");
    }

    #[test]
    fn test_juggle_880_heading() {
        let field = Field::from_pairs(
            "880",
            '1',
            ' ',
            &[('6', "100-01/(3/r"), ('a', "سميث، جون")],
        );
        let juggled = juggle_880(&field);
        assert_eq!(juggled.tag, "400");
        assert!(!juggled.has_subfield('6'));
        assert_eq!(juggled.get_subfield('a'), Some("سميث، جون"));
    }

    #[test]
    fn test_juggle_880_title() {
        let field = Field::from_pairs(
            "880",
            '1',
            '0',
            &[('6', "245-02"), ('a', "Title"), ('c', "by someone")],
        );
        let juggled = juggle_880(&field);
        assert_eq!(juggled.tag, "246");
        assert!(!juggled.has_subfield('c'));
    }

    #[test]
    fn test_juggle_leaves_other_fields() {
        let field = Field::from_pairs("650", ' ', '0', &[('a', "Anatomy")]);
        assert_eq!(juggle_880(&field), field);
        let broken = Field::from_pairs("880", ' ', ' ', &[('6', "junk"), ('a', "x")]);
        assert_eq!(juggle_880(&broken).tag, "880");
    }
}
