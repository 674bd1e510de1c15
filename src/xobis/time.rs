//! Time values: numeric and named time entries, instance and duration refs,
//! and the Time principal element.
//!
//! A [`TimeEntryContent`] is either an ordered set of numeric parts (each
//! part at most once) or a single named period, never both. Numeric parts
//! render zero-filled: years to four digits with a leading `-` before the
//! common era, timezone parts with an explicit sign, milliseconds unpadded.

use crate::error::{Result, XobisError};
use crate::xml::Element;
use crate::xobis::common::{push_notes, GenericType, LinkAttributes, NameContent, Note};
use crate::xobis::principal::{EntryContent, MainEntry};
use crate::xobis::variant::Variant;
use std::fmt::Write as _;

xobis_vocabulary! {
    /// How certain a time entry is.
    Certainty, "certainty" {
        Exact => "exact",
        Implied => "implied",
        Estimated => "estimated",
        Approximate => "approximate",
    }
}

/// One numeric component of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimePart {
    /// Year; negative before the common era
    Year(i32),
    /// Month 1-12
    Month(u8),
    /// Day 1-31
    Day(u8),
    /// Hour 0-24
    Hour(u8),
    /// Timezone hour offset
    TzHour(i8),
    /// Minute 0-59
    Minute(u8),
    /// Timezone minute offset
    TzMinute(i8),
    /// Second 0-60
    Second(u8),
    /// Milliseconds 0-999
    Milliseconds(u16),
}

impl TimePart {
    /// Position in serialization order.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            TimePart::Year(_) => 0,
            TimePart::Month(_) => 1,
            TimePart::Day(_) => 2,
            TimePart::Hour(_) => 3,
            TimePart::TzHour(_) => 4,
            TimePart::Minute(_) => 5,
            TimePart::TzMinute(_) => 6,
            TimePart::Second(_) => 7,
            TimePart::Milliseconds(_) => 8,
        }
    }

    /// XML element name.
    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        match self {
            TimePart::Year(_) => "year",
            TimePart::Month(_) => "month",
            TimePart::Day(_) => "day",
            TimePart::Hour(_) => "hour",
            TimePart::TzHour(_) => "tzHour",
            TimePart::Minute(_) => "minute",
            TimePart::TzMinute(_) => "tzMinute",
            TimePart::Second(_) => "second",
            TimePart::Milliseconds(_) => "milliseconds",
        }
    }

    /// Zero-filled text value.
    #[must_use]
    pub fn formatted(&self) -> String {
        match *self {
            TimePart::Year(y) if y < 0 => format!("-{:04}", -i64::from(y)),
            TimePart::Year(y) => format!("{y:04}"),
            TimePart::Month(v)
            | TimePart::Day(v)
            | TimePart::Hour(v)
            | TimePart::Minute(v)
            | TimePart::Second(v) => format!("{v:02}"),
            TimePart::TzHour(v) | TimePart::TzMinute(v) => {
                let sign = if v < 0 { '-' } else { '+' };
                format!("{sign}{:02}", v.unsigned_abs())
            }
            TimePart::Milliseconds(v) => v.to_string(),
        }
    }

    fn is_date(&self) -> bool {
        matches!(self, TimePart::Year(_) | TimePart::Month(_) | TimePart::Day(_))
    }

    fn is_time_of_day(&self) -> bool {
        matches!(
            self,
            TimePart::Hour(_)
                | TimePart::Minute(_)
                | TimePart::Second(_)
                | TimePart::TzHour(_)
                | TimePart::TzMinute(_)
        )
    }

    fn check_range(&self) -> Result<()> {
        let ok = match *self {
            TimePart::Year(_) => true,
            TimePart::Month(v) => (1..=12).contains(&v),
            TimePart::Day(v) => (1..=31).contains(&v),
            TimePart::Hour(v) => v <= 24,
            TimePart::Minute(v) => v <= 59,
            TimePart::Second(v) => v <= 60,
            TimePart::TzHour(v) => (-14..=14).contains(&v),
            TimePart::TzMinute(v) => (-59..=59).contains(&v),
            TimePart::Milliseconds(v) => v <= 999,
        };
        if ok {
            Ok(())
        } else {
            Err(XobisError::Invariant(format!(
                "{} out of range: {}",
                self.element_name(),
                self.formatted()
            )))
        }
    }
}

/// Body of a time entry: numeric parts or a named period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeEntryBody {
    /// Numeric parts in serialization order
    Numeric(Vec<TimePart>),
    /// Named period, e.g. "Renaissance"
    Named(NameContent),
}

/// The `<content>` of a time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryContent {
    /// Certainty; `None` and `Exact` both mean exact
    pub certainty: Option<Certainty>,
    /// Parts or name
    pub body: TimeEntryBody,
}

impl TimeEntryContent {
    /// Numeric content.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] if there are no parts, a part occurs
    /// twice, a value is out of range, the zone hour and minute carry
    /// opposite signs, or time-of-day parts appear without a year, month or
    /// day.
    pub fn numeric(parts: Vec<TimePart>, certainty: Option<Certainty>) -> Result<Self> {
        if parts.is_empty() {
            return Err(XobisError::Invariant("time entry has no parts".into()));
        }
        let mut parts = parts;
        parts.sort_by_key(TimePart::rank);
        for pair in parts.windows(2) {
            if pair[0].rank() == pair[1].rank() {
                return Err(XobisError::Invariant(format!(
                    "time part {} given twice",
                    pair[0].element_name()
                )));
            }
        }
        for part in &parts {
            part.check_range()?;
        }
        let zone = |rank: u8| {
            parts.iter().find_map(|p| match *p {
                TimePart::TzHour(v) | TimePart::TzMinute(v) if p.rank() == rank => Some(v),
                _ => None,
            })
        };
        if let (Some(hour), Some(minute)) = (zone(4), zone(6)) {
            if (hour < 0 && minute > 0) || (hour > 0 && minute < 0) {
                return Err(XobisError::Invariant(
                    "zone hour and minute differ in sign".into(),
                ));
            }
        }
        if parts.iter().any(TimePart::is_time_of_day) && !parts.iter().any(TimePart::is_date) {
            return Err(XobisError::Invariant(
                "time of day needs a year, month or day".into(),
            ));
        }
        Ok(TimeEntryContent {
            certainty,
            body: TimeEntryBody::Numeric(parts),
        })
    }

    /// Named-period content.
    pub fn named(name: NameContent, certainty: Option<Certainty>) -> Self {
        TimeEntryContent {
            certainty,
            body: TimeEntryBody::Named(name),
        }
    }

    /// Year-only content.
    ///
    /// # Errors
    ///
    /// Never fails for a year; kept fallible for symmetry with [`Self::numeric`].
    pub fn year(year: i32, certainty: Option<Certainty>) -> Result<Self> {
        Self::numeric(vec![TimePart::Year(year)], certainty)
    }

    /// The numeric parts, empty for a named period.
    #[must_use]
    pub fn parts(&self) -> &[TimePart] {
        match &self.body {
            TimeEntryBody::Numeric(parts) => parts,
            TimeEntryBody::Named(_) => &[],
        }
    }

    /// The named period, if any.
    #[must_use]
    pub fn name(&self) -> Option<&NameContent> {
        match &self.body {
            TimeEntryBody::Named(name) => Some(name),
            TimeEntryBody::Numeric(_) => None,
        }
    }

    /// The year part, if any.
    #[must_use]
    pub fn year_value(&self) -> Option<i32> {
        self.parts().iter().find_map(|p| match p {
            TimePart::Year(y) => Some(*y),
            _ => None,
        })
    }

    /// Effective certainty.
    #[must_use]
    pub fn certainty(&self) -> Certainty {
        self.certainty.unwrap_or(Certainty::Exact)
    }

    /// Render numeric content as partial ISO-8601.
    ///
    /// Returns `None` for named periods and for part sets that are not a
    /// contiguous prefix of `YYYY-MM-DDTHH:MM:SS.sss±HH:MM`.
    #[must_use]
    pub fn to_iso(&self) -> Option<String> {
        let parts = self.parts();
        let find = |rank: u8| parts.iter().find(|p| p.rank() == rank).copied();
        let get_u8 = |rank: u8| match find(rank) {
            Some(
                TimePart::Month(v)
                | TimePart::Day(v)
                | TimePart::Hour(v)
                | TimePart::Minute(v)
                | TimePart::Second(v),
            ) => Some(v),
            _ => None,
        };

        let Some(TimePart::Year(year)) = find(0) else {
            return None;
        };
        let chain = [get_u8(1), get_u8(2), get_u8(3), get_u8(5), get_u8(7)];
        let present = chain.iter().take_while(|v| v.is_some()).count();
        if chain[present..].iter().any(Option::is_some) {
            return None;
        }

        let mut iso = TimePart::Year(year).formatted();
        let separators = ["-", "-", "T", ":", ":"];
        for (value, separator) in chain.iter().zip(separators).take(present) {
            let _ = write!(iso, "{separator}{:02}", value.unwrap_or_default());
        }

        let millis = find(8);
        if let Some(TimePart::Milliseconds(ms)) = millis {
            if present < 5 {
                return None;
            }
            let _ = write!(iso, ".{ms:03}");
        }

        match (find(4), find(6)) {
            (None, None) => {}
            (Some(TimePart::TzHour(hour)), minute) if present >= 3 => {
                let minute = match minute {
                    Some(TimePart::TzMinute(m)) => Some(m),
                    _ => None,
                };
                let sign = if hour < 0 || minute.is_some_and(|m| m < 0) { '-' } else { '+' };
                let _ = write!(iso, "{sign}{:02}", hour.unsigned_abs());
                if let Some(m) = minute {
                    let _ = write!(iso, ":{:02}", m.unsigned_abs());
                }
            }
            _ => return None,
        }
        Some(iso)
    }

    /// Render as `<content certainty?>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("content");
        if let Some(certainty) = self.certainty.filter(|c| *c != Certainty::Exact) {
            element.set_attr("certainty", certainty.as_str());
        }
        match &self.body {
            TimeEntryBody::Numeric(parts) => {
                for part in parts {
                    element.push(Element::text_element(part.element_name(), part.formatted()));
                }
            }
            TimeEntryBody::Named(name) => element.push(name.to_element("name")),
        }
        element
    }
}

/// One side of a time entry: optional scheme, calendar and type, then one
/// content or two (a double date such as `1983/84`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryPart {
    /// Scheme attribute
    pub scheme: Option<String>,
    /// Calendar attribute
    pub calendar: Option<String>,
    /// Entry type, e.g. Born or Died
    pub entry_type: Option<GenericType>,
    /// Main content
    pub content: TimeEntryContent,
    /// Second content of a double date
    pub second: Option<TimeEntryContent>,
}

impl TimeEntryPart {
    /// A part with a single content.
    pub fn new(content: TimeEntryContent) -> Self {
        TimeEntryPart {
            scheme: None,
            calendar: None,
            entry_type: None,
            content,
            second: None,
        }
    }

    /// A double-date part.
    pub fn double(content: TimeEntryContent, second: TimeEntryContent) -> Self {
        TimeEntryPart {
            second: Some(second),
            ..TimeEntryPart::new(content)
        }
    }

    /// Set the entry type.
    #[must_use]
    pub fn with_type(mut self, entry_type: Option<GenericType>) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Write attributes and children onto `<entry>` or `<part>`.
    pub fn write_into(&self, element: &mut Element) {
        element.set_opt_attr("scheme", self.scheme.as_ref());
        element.set_opt_attr("calendar", self.calendar.as_ref());
        if let Some(entry_type) = &self.entry_type {
            element.push(entry_type.to_element());
        }
        element.push(self.content.to_element());
        if let Some(second) = &self.second {
            element.push(second.to_element());
        }
    }

    fn to_element(&self, name: &str) -> Element {
        let mut element = Element::new(name);
        self.write_into(&mut element);
        element
    }
}

/// A single time entry used as a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRef {
    /// Link to a Time record
    pub link: Option<LinkAttributes>,
    /// The entry
    pub entry: TimeEntryPart,
}

impl TimeRef {
    /// Create a time ref.
    pub fn new(entry: TimeEntryPart) -> Self {
        TimeRef { link: None, entry }
    }

    /// Render as `<time>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("time");
        if let Some(link) = &self.link {
            link.write_into(&mut element);
        }
        element.push(self.entry.to_element("entry"));
        element
    }
}

/// A span of two time entries used as a link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationRef {
    /// Link to a Time record
    pub link: Option<LinkAttributes>,
    /// Start
    pub start: TimeEntryPart,
    /// End
    pub end: TimeEntryPart,
}

impl DurationRef {
    /// Create a duration ref.
    pub fn new(start: TimeEntryPart, end: TimeEntryPart) -> Self {
        DurationRef {
            link: None,
            start,
            end,
        }
    }

    /// Render as `<duration>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("duration");
        if let Some(link) = &self.link {
            link.write_into(&mut element);
        }
        element.push(self.start.to_element("part"));
        element.push(self.end.to_element("part"));
        element
    }
}

/// Either a time instance or a duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeOrDurationRef {
    /// Instance
    Time(TimeRef),
    /// Duration
    Duration(DurationRef),
}

impl TimeOrDurationRef {
    /// Render as `<time>` or `<duration>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            TimeOrDurationRef::Time(t) => t.to_element(),
            TimeOrDurationRef::Duration(d) => d.to_element(),
        }
    }

    /// Link attributes of either shape.
    #[must_use]
    pub fn link(&self) -> Option<&LinkAttributes> {
        match self {
            TimeOrDurationRef::Time(t) => t.link.as_ref(),
            TimeOrDurationRef::Duration(d) => d.link.as_ref(),
        }
    }

    /// Set link attributes on either shape.
    pub fn set_link(&mut self, link: Option<LinkAttributes>) {
        match self {
            TimeOrDurationRef::Time(t) => t.link = link,
            TimeOrDurationRef::Duration(d) => d.link = link,
        }
    }

    /// Whether this is a duration.
    #[must_use]
    pub fn is_duration(&self) -> bool {
        matches!(self, TimeOrDurationRef::Duration(_))
    }
}

/// Entry content of a Time element or variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeContent {
    /// A single instance
    Instance(TimeEntryPart),
    /// A duration
    Duration(TimeEntryPart, TimeEntryPart),
}

impl TimeContent {
    /// The same value as a ref.
    #[must_use]
    pub fn to_ref(&self) -> TimeOrDurationRef {
        match self {
            TimeContent::Instance(part) => TimeOrDurationRef::Time(TimeRef::new(part.clone())),
            TimeContent::Duration(start, end) => {
                TimeOrDurationRef::Duration(DurationRef::new(start.clone(), end.clone()))
            }
        }
    }
}

impl From<TimeOrDurationRef> for TimeContent {
    fn from(value: TimeOrDurationRef) -> Self {
        match value {
            TimeOrDurationRef::Time(t) => TimeContent::Instance(t.entry),
            TimeOrDurationRef::Duration(d) => TimeContent::Duration(d.start, d.end),
        }
    }
}

impl EntryContent for TimeContent {
    fn write_entry(&self, entry: &mut Element) {
        match self {
            TimeContent::Instance(part) => part.write_into(entry),
            TimeContent::Duration(start, end) => {
                entry.push(start.to_element("part"));
                entry.push(end.to_element("part"));
            }
        }
    }
}

/// The Time principal element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Time {
    /// Main entry
    pub entry: MainEntry<TimeContent>,
    /// Variants
    pub variants: Vec<Variant<TimeContent>>,
    /// Notes
    pub notes: Vec<Note>,
}

impl Time {
    /// Render as `<time>`.
    #[must_use]
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("time");
        element.push(self.entry.to_element());
        element.push_list("variants", self.variants.iter().map(Variant::to_element).collect());
        push_notes(&mut element, &self.notes);
        element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::element_to_string;

    #[test]
    fn test_part_formatting() {
        assert_eq!(TimePart::Year(-44).formatted(), "-0044");
        assert_eq!(TimePart::Year(1851).formatted(), "1851");
        assert_eq!(TimePart::Year(7).formatted(), "0007");
        assert_eq!(TimePart::Month(3).formatted(), "03");
        assert_eq!(TimePart::TzHour(-8).formatted(), "-08");
        assert_eq!(TimePart::TzHour(5).formatted(), "+05");
        assert_eq!(TimePart::Milliseconds(7).formatted(), "7");
    }

    #[test]
    fn test_numeric_sorts_and_rejects_duplicates() {
        let content =
            TimeEntryContent::numeric(vec![TimePart::Day(2), TimePart::Year(1990)], None).unwrap();
        assert_eq!(content.parts()[0], TimePart::Year(1990));

        let err = TimeEntryContent::numeric(vec![TimePart::Year(1), TimePart::Year(2)], None);
        assert!(err.is_err());
        assert!(TimeEntryContent::numeric(Vec::new(), None).is_err());
        assert!(TimeEntryContent::numeric(vec![TimePart::Month(13)], None).is_err());
    }

    #[test]
    fn test_time_of_day_needs_date() {
        assert!(TimeEntryContent::numeric(vec![TimePart::Hour(10)], None).is_err());
        assert!(TimeEntryContent::numeric(vec![TimePart::TzHour(1)], None).is_err());
        let mixed = vec![TimePart::Year(2000), TimePart::TzHour(-5), TimePart::TzMinute(30)];
        assert!(matches!(
            TimeEntryContent::numeric(mixed, None),
            Err(XobisError::Invariant(_))
        ));
        assert!(TimeEntryContent::numeric(vec![TimePart::Milliseconds(5)], None).is_ok());
        assert!(
            TimeEntryContent::numeric(vec![TimePart::Day(1), TimePart::Hour(10)], None).is_ok()
        );
    }

    #[test]
    fn test_to_iso() {
        let content = TimeEntryContent::numeric(
            vec![
                TimePart::Year(2001),
                TimePart::Month(2),
                TimePart::Day(3),
                TimePart::Hour(4),
                TimePart::Minute(5),
                TimePart::Second(6),
                TimePart::TzHour(-8),
                TimePart::TzMinute(-30),
            ],
            None,
        )
        .unwrap();
        assert_eq!(content.to_iso().as_deref(), Some("2001-02-03T04:05:06-08:30"));

        let west_of_utc = TimeEntryContent::numeric(
            vec![
                TimePart::Year(2000),
                TimePart::Month(1),
                TimePart::Day(1),
                TimePart::Hour(1),
                TimePart::TzHour(0),
                TimePart::TzMinute(-30),
            ],
            None,
        )
        .unwrap();
        assert_eq!(west_of_utc.to_iso().as_deref(), Some("2000-01-01T01-00:30"));

        let gap = TimeEntryContent::numeric(vec![TimePart::Year(2001), TimePart::Day(3)], None)
            .unwrap();
        assert_eq!(gap.to_iso(), None);

        let named = TimeEntryContent::named(NameContent::new("Renaissance"), None);
        assert_eq!(named.to_iso(), None);
    }

    #[test]
    fn test_content_element_hides_exact() {
        let exact = TimeEntryContent::year(1990, Some(Certainty::Exact)).unwrap();
        assert_eq!(exact.to_element().attr("certainty"), None);
        let approx = TimeEntryContent::year(1851, Some(Certainty::Approximate)).unwrap();
        assert_eq!(
            element_to_string(&approx.to_element()).unwrap(),
            r#"<content certainty="approximate"><year>1851</year></content>"#
        );
    }

    #[test]
    fn test_duration_ref_element() {
        let start = TimeEntryPart::double(
            TimeEntryContent::year(1983, None).unwrap(),
            TimeEntryContent::year(1984, None).unwrap(),
        );
        let end = TimeEntryPart::new(TimeEntryContent::year(1985, None).unwrap())
            .with_type(Some(GenericType::titled("Died")));
        let duration = DurationRef::new(start, end).to_element();
        let parts = duration.children_named("part");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].children_named("content").len(), 2);
        assert_eq!(parts[1].child("type").unwrap().attr("xlink:title"), Some("Died"));
    }
}
