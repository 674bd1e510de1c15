//! Free-form date parsing.
//!
//! Catalogers write dates in many shapes: `1851?`, `approximately 1851`,
//! `44 B.C.`, `1983/84-1984/85`, `fl. 1720-1750`, `1990 May 12`,
//! `2003-04-05T10:30:00Z`, `19th century`, and so on. [`DateTimeParser`]
//! turns such a string into a [`TimeOrDurationRef`]:
//!
//! 1. canonicalize the text (scripts, digits, era markers, punctuation);
//! 2. strip a leading keyword (`active`, `born`, `died`);
//! 3. split on the range separator into one or two halves;
//! 4. split each half into a double date on `/` or `or`;
//! 5. parse every atom as partial ISO-8601, or keep it as a named period.
//!
//! Atoms that are not ISO-8601 become named periods, so only empty or
//! symbol-only input fails.

use crate::builders::time::time_or_duration;
use crate::element_type::ElementType;
use crate::error::{Result, XobisError};
use crate::indexer::{Indexer, CONFLICT, UNVERIFIED};
use crate::xobis::common::{GenericType, LinkAttributes, NameContent};
use crate::xobis::time::{
    Certainty, DurationRef, TimeEntryContent, TimeEntryPart, TimeOrDurationRef, TimePart,
};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Calendar attribute set by `A.H.` dates.
pub const HIJRI: &str = "Hijri";

const PRESENT: &str = "Present";
const UNKNOWN: &str = "Unknown";
const TIME_TYPE: &str = "Time Type";

const MONTHS: &str = "(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const ARABIC_WORDS: &[(&str, &str)] = &[
    ("حوالي", " approximately "),
    ("توفي", " died "),
    ("ت.", " died "),
    ("إزدهر", " flourished "),
    ("أو", " or "),
    ("او", " or "),
    ("هـ", " A.H. "),
];

const HEBREW_WORDS: &[(&str, &str)] = &[("נפ׳", " died "), ("או", " or "), ("־", "-")];

lazy_static! {
    static ref ISO: Regex = Regex::new(
        r"^(-?\d{4})(?:-(\d{2})(?:-(\d{2})(?:T(\d{2})(?::(\d{2})(?::(\d{2})(?:[.,](\d+))?)?)?(Z|([+-])(\d{2})(?::?(\d{2}))?(?::?\d{2})?)?)?)?)?$"
    )
    .unwrap();
    static ref APPROXIMATE: Regex =
        Regex::new(r"(?i)^(approximately|approx\.?|ca\.|circa)\s*").unwrap();
    static ref ACTIVE: Regex = Regex::new(r"(?i)^(active|flourished|fl\.)\s*").unwrap();
    static ref BORN: Regex = Regex::new(r"^(?:(?i:born)|b\.)\s*").unwrap();
    static ref DIED: Regex = Regex::new(r"^(?:(?i:died)|d\.)\s*").unwrap();
    static ref BCE: Regex = Regex::new(r"\s*B\.?\s?C\.?(?:\s?E\.?)?$").unwrap();
    static ref COMMON_ERA: Regex =
        Regex::new(r"(^|[^.A-Za-z])(?:A\.?\s?D|C\.?\s?E)\.?($|\s)").unwrap();
    static ref HIJRI_ERA: Regex = Regex::new(r"(^|[^.A-Za-z])A\.?\s?H\.?($|\s)").unwrap();
    static ref WORD_TO: Regex = Regex::new(r"(\d)\s+to\s+(\d)").unwrap();
    static ref OR_WORD: Regex = Regex::new(r"(?i)\s+or\s+").unwrap();
    static ref SHORT_YEAR: Regex = Regex::new(r"^(-?)(\d{1,3})($|-\d)").unwrap();
    static ref FIRST_YEAR: Regex = Regex::new(r"\d{4}").unwrap();
    static ref TWO_DIGIT_TAIL: Regex = Regex::new(r"^([\[\]?\s]*)(\d{2})([\[\]?\s]*)$").unwrap();
    static ref ENDS_WITH_YEAR: Regex = Regex::new(r"(?:^|[^\d])-?\d{4}$").unwrap();
    static ref ENDS_WITH_MONTH: Regex = Regex::new(r"\d{4}-\d{2}$").unwrap();
    static ref STARTS_WITH_PAIR: Regex = Regex::new(r"^(\d{2})($|[^\d])").unwrap();
    static ref STARTS_WITH_DAY_OR_TIME: Regex = Regex::new(r"^\d{2}(?:-\d{2}|T)").unwrap();
    static ref YEAR_MONTH_DAY: Regex =
        Regex::new(&format!(r"(?i)^(\d{{1,4}})\s+{MONTHS}\.?\s+(\d{{1,2}})$")).unwrap();
    static ref MONTH_DAY_YEAR: Regex =
        Regex::new(&format!(r"(?i)^{MONTHS}\.?\s+(\d{{1,2}}),?\s+(\d{{1,4}})$")).unwrap();
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(&format!(r"(?i)^(\d{{1,2}})\s+{MONTHS}\.?,?\s+(\d{{1,4}})$")).unwrap();
    static ref MONTH_YEAR: Regex =
        Regex::new(&format!(r"(?i)^{MONTHS}\.?,?\s+(\d{{3,4}})$")).unwrap();
    static ref YEAR_MONTH: Regex =
        Regex::new(&format!(r"(?i)^(\d{{3,4}})\s+{MONTHS}\.?$")).unwrap();
}

/// How a date string is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateContext {
    /// A person's dates: the halves of a range are Born and Died.
    Lifespan,
    /// Any other date.
    #[default]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Active,
    Born,
    Died,
}

/// Parser for cataloger date strings.
///
/// With an indexer, entry types and well-known named periods are linked to
/// their authority records; without one, types carry a title only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeParser<'a> {
    indexer: Option<&'a Indexer>,
}

impl<'a> DateTimeParser<'a> {
    /// A parser that does not link anything.
    #[must_use]
    pub fn new() -> Self {
        DateTimeParser { indexer: None }
    }

    /// A parser that links types and named periods through `indexer`.
    #[must_use]
    pub fn with_indexer(indexer: &'a Indexer) -> Self {
        DateTimeParser {
            indexer: Some(indexer),
        }
    }

    /// Parse a date string.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::InvalidDate`] if nothing usable remains after
    /// canonicalization, or a numeric part is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use xobis::datetime::{DateContext, DateTimeParser};
    ///
    /// let time = DateTimeParser::new().parse("44 B.C.", DateContext::General).unwrap();
    /// assert!(!time.is_duration());
    /// ```
    pub fn parse(&self, input: &str, context: DateContext) -> Result<TimeOrDurationRef> {
        let invalid = || XobisError::InvalidDate(input.to_string());
        let (mut text, calendar) = canonicalize(input);
        if !text.chars().any(char::is_alphanumeric) {
            return Err(invalid());
        }

        let mut keyword = None;
        if let Some(rest) = strip_prefix(&ACTIVE, &text) {
            keyword = Some(Keyword::Active);
            text = rest;
        } else if let Some(rest) = strip_prefix(&BORN, &text) {
            keyword = Some(Keyword::Born);
            text = format!("{rest}-{UNKNOWN}");
        } else if let Some(rest) = strip_prefix(&DIED, &text) {
            keyword = Some(Keyword::Died);
            text = format!("{UNKNOWN}-{rest}");
        }
        if !text.chars().any(char::is_alphanumeric) {
            return Err(invalid());
        }

        let mut halves = match find_range_separator(&text) {
            Some(at) => {
                let start = text[..at].trim().to_string();
                let mut end = text[at + 1..].trim().to_string();
                if end.is_empty() {
                    end = PRESENT.to_string();
                }
                let start = if start.is_empty() { UNKNOWN.to_string() } else { start };
                let crosses_era = BCE.is_match(&end) && !BCE.is_match(&start);
                let start = if crosses_era && start.chars().any(|c| c.is_ascii_digit()) {
                    format!("{start} B.C.")
                } else {
                    start
                };
                let end = expand_tail(&start, &end);
                vec![
                    parse_half(&start).map_err(|_| invalid())?,
                    parse_half(&end).map_err(|_| invalid())?,
                ]
            }
            None => vec![parse_half(&text).map_err(|_| invalid())?],
        };

        let reversed = match halves.as_slice() {
            [start, end] => matches!(
                (start[0].year_value(), end[0].year_value()),
                (Some(a), Some(b)) if a > b
            ),
            _ => false,
        };
        if reversed {
            halves.swap(0, 1);
        }

        let types = self.entry_types(keyword, context, &halves)?;
        let parts = halves
            .into_iter()
            .zip(types)
            .map(|(mut contents, entry_type)| {
                let first = contents.remove(0);
                (entry_type, first, contents.pop())
            })
            .collect::<Vec<_>>();
        let mut time = time_or_duration(parts, calendar).map_err(|_| invalid())?;
        if let TimeOrDurationRef::Time(instance) = &time {
            let link = self.named_period_link(&instance.entry);
            time.set_link(link);
        }
        Ok(time)
    }

    /// Parse a pair of start/end subfields (`$7`/`$9`): both present gives a
    /// duration, one present an instance.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::InvalidDate`] if neither is present or either
    /// fails to parse.
    pub fn parse_span(&self, start: Option<&str>, end: Option<&str>) -> Result<TimeOrDurationRef> {
        match (start, end) {
            (Some(start), Some(end)) => {
                let start = first_part(self.parse(start, DateContext::General)?);
                let end = first_part(self.parse(end, DateContext::General)?);
                Ok(TimeOrDurationRef::Duration(DurationRef::new(start, end)))
            }
            (Some(one), None) | (None, Some(one)) => self.parse(one, DateContext::General),
            (None, None) => Err(XobisError::InvalidDate(String::new())),
        }
    }

    fn entry_types(
        &self,
        keyword: Option<Keyword>,
        context: DateContext,
        halves: &[Vec<TimeEntryContent>],
    ) -> Result<Vec<Option<GenericType>>> {
        let is_open = |contents: &[TimeEntryContent]| {
            contents
                .first()
                .and_then(TimeEntryContent::name)
                .is_some_and(|n| n.text == PRESENT || n.text == UNKNOWN)
        };
        let titles: Vec<Option<&str>> = match (keyword, halves) {
            (Some(Keyword::Active), _) => vec![Some("Active"); halves.len()],
            (Some(Keyword::Born), _) => vec![Some("Born"), None],
            (Some(Keyword::Died), _) => vec![None, Some("Died")],
            (None, [start, end]) if context == DateContext::Lifespan => vec![
                (!is_open(start)).then_some("Born"),
                (!is_open(end)).then_some("Died"),
            ],
            (None, _) => vec![None; halves.len()],
        };
        titles
            .into_iter()
            .map(|title| title.map(|t| self.generic_type(t)).transpose())
            .collect()
    }

    fn generic_type(&self, title: &str) -> Result<GenericType> {
        match self.indexer {
            Some(indexer) => GenericType::new(
                title,
                Some(indexer.simple_lookup(title, Some(ElementType::Concept))),
                Some(indexer.simple_lookup(TIME_TYPE, Some(ElementType::Concept))),
            ),
            None => Ok(GenericType::titled(title)),
        }
    }

    fn named_period_link(&self, part: &TimeEntryPart) -> Option<LinkAttributes> {
        let indexer = self.indexer?;
        if part.second.is_some() {
            return None;
        }
        let name = part.content.name()?;
        let href = indexer.simple_lookup(&name.text, Some(ElementType::Time));
        (href != UNVERIFIED && href != CONFLICT).then(|| LinkAttributes::new(name.text.as_str(), Some(href)))
    }
}

/// Parse a date string without linking.
///
/// # Errors
///
/// See [`DateTimeParser::parse`].
pub fn parse(input: &str, context: DateContext) -> Result<TimeOrDurationRef> {
    DateTimeParser::new().parse(input, context)
}

/// Parse a single atomic date (no range, no double date) into entry content.
///
/// Accepts everything [`TimeEntryContent::to_iso`] produces.
///
/// # Errors
///
/// Returns [`XobisError::InvalidDate`] for empty or symbol-only input.
pub fn parse_entry_content(atom: &str) -> Result<TimeEntryContent> {
    parse_atom(atom, None)
}

fn first_part(time: TimeOrDurationRef) -> TimeEntryPart {
    match time {
        TimeOrDurationRef::Time(time) => time.entry,
        TimeOrDurationRef::Duration(duration) => duration.start,
    }
}

fn strip_prefix(pattern: &Regex, text: &str) -> Option<String> {
    pattern.find(text).map(|m| text[m.end()..].trim().to_string())
}

/// Translate scripts and digits, unify separators, strip era markers and
/// terminal punctuation. Returns the text and the calendar it implies.
fn canonicalize(input: &str) -> (String, Option<&'static str>) {
    let mut text: String = input
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            '\u{2010}'..='\u{2015}' => '-',
            _ => c,
        })
        .collect();
    for (from, to) in ARABIC_WORDS.iter().chain(HEBREW_WORDS) {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.starts_with('(') && text.ends_with(')') {
        text = text[1..text.len() - 1].to_string();
    }
    text = WORD_TO.replace_all(&text, "$1-$2").into_owned();

    let mut calendar = None;
    if HIJRI_ERA.is_match(&text) {
        calendar = Some(HIJRI);
        text = HIJRI_ERA.replace_all(&text, "$1$2").into_owned();
    }
    text = COMMON_ERA.replace_all(&text, "$1$2").into_owned();

    let text = text
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':') || c.is_whitespace())
        .trim()
        .to_string();
    (text, calendar)
}

/// Byte offset of the `-` separating a range, if any.
///
/// Leading minus signs, hyphens inside words or ISO times, month and day
/// tails, and placeholder years such as `199-` or `19--` are not separators.
fn find_range_separator(text: &str) -> Option<usize> {
    for (i, c) in text.char_indices() {
        if c != '-' || i == 0 {
            continue;
        }
        let before = &text[..i];
        let after = &text[i + 1..];

        let prev = before.chars().next_back();
        let next = after.chars().next();
        if prev.is_some_and(char::is_alphabetic) && next.is_some_and(char::is_alphabetic) {
            continue;
        }

        let token = before.rsplit(char::is_whitespace).next().unwrap_or("");
        if token.contains('T') && token.starts_with(|ch: char| ch.is_ascii_digit() || ch == '-') {
            continue;
        }

        if is_placeholder(before, after) {
            continue;
        }

        if let Some(caps) = STARTS_WITH_PAIR.captures(after) {
            let pair: u32 = caps[1].parse().unwrap_or(0);
            if ENDS_WITH_MONTH.is_match(before) {
                continue;
            }
            if ENDS_WITH_YEAR.is_match(before) && (1..=12).contains(&pair) {
                continue;
            }
        }
        if ENDS_WITH_YEAR.is_match(before) && STARTS_WITH_DAY_OR_TIME.is_match(after) {
            continue;
        }
        return Some(i);
    }
    None
}

fn is_placeholder(before: &str, after: &str) -> bool {
    let run: String = before
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == '-' || *c == 'u')
        .collect();
    let boundary = before[..before.len() - run.len()]
        .chars()
        .next_back()
        .map_or(true, |c| c.is_whitespace() || c == '[' || c == '(');
    let dashes = after.chars().take_while(|c| *c == '-').count() + 1;
    let rest = &after[dashes - 1..];
    let ends = rest
        .chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || matches!(c, ']' | ')' | '?'));
    boundary && !run.is_empty() && run.chars().any(|c| c.is_ascii_digit()) && run.len() + dashes == 4 && ends
}

/// Expand a two-digit tail (`84` after `1983`) to a full year.
fn expand_tail(first: &str, second: &str) -> String {
    let (Some(caps), Some(year)) = (TWO_DIGIT_TAIL.captures(second), FIRST_YEAR.find(first)) else {
        return second.to_string();
    };
    let year = year.as_str();
    let century: u32 = year[..2].parse().unwrap_or(0);
    let start_tail: u32 = year[2..].parse().unwrap_or(0);
    let tail: u32 = caps[2].parse().unwrap_or(0);
    let century = if tail < start_tail { century + 1 } else { century };
    format!("{}{century:02}{tail:02}{}", &caps[1], &caps[3])
}

/// Parse one side of a range into one or two contents.
fn parse_half(half: &str) -> Result<Vec<TimeEntryContent>> {
    let (certainty, core) = strip_certainty(half);
    if core.is_empty() {
        return Ok(vec![TimeEntryContent::named(NameContent::new(UNKNOWN), certainty)]);
    }
    if let Some((a, b)) = core.split_once('/') {
        let b = expand_tail(a, b);
        return Ok(vec![parse_atom(a, certainty)?, parse_atom(&b, certainty)?]);
    }
    if let Some(m) = OR_WORD.find(&core) {
        let (a, b) = (&core[..m.start()], &core[m.end()..]);
        let b = expand_tail(a, b);
        let estimated = Some(Certainty::Estimated);
        return Ok(vec![parse_atom(a, estimated)?, parse_atom(&b, estimated)?]);
    }
    Ok(vec![parse_atom(&core, certainty)?])
}

/// Read certainty markers off a half. Approximate beats estimated beats
/// implied; exact is `None`.
fn strip_certainty(half: &str) -> (Option<Certainty>, String) {
    let implied = half.contains('[') || half.contains(']');
    let mut text: String = half.chars().filter(|c| *c != '[' && *c != ']').collect();
    text = text.trim().to_string();

    let approximate = match strip_prefix(&APPROXIMATE, &text) {
        Some(rest) => {
            text = rest;
            true
        }
        None => false,
    };
    let estimated = text.ends_with('?');
    text = text.trim_end_matches('?').trim().to_string();

    let certainty = if approximate {
        Some(Certainty::Approximate)
    } else if estimated {
        Some(Certainty::Estimated)
    } else if implied {
        Some(Certainty::Implied)
    } else {
        None
    };
    (certainty, text)
}

fn parse_atom(atom: &str, certainty: Option<Certainty>) -> Result<TimeEntryContent> {
    let invalid = || XobisError::InvalidDate(atom.to_string());
    let mut text = atom.trim().trim_end_matches([',', ';']).trim().to_string();
    if !text.chars().any(char::is_alphanumeric) {
        return Err(invalid());
    }

    let before_common_era = BCE.is_match(&text);
    if before_common_era {
        text = BCE.replace(&text, "").trim().to_string();
    }

    let text = substitute_month(&text).unwrap_or(text);
    let text = SHORT_YEAR
        .replace(&text, |caps: &Captures| format!("{}{:0>4}{}", &caps[1], &caps[2], &caps[3]))
        .into_owned();

    match parse_iso(&text) {
        Some(mut parts) => {
            if before_common_era {
                for part in &mut parts {
                    if let TimePart::Year(year) = part {
                        *year = -*year;
                    }
                }
            }
            TimeEntryContent::numeric(parts, certainty).map_err(|_| invalid())
        }
        None => {
            let name = if before_common_era {
                format!("{} B.C.", text.trim_end_matches('.'))
            } else {
                text
            };
            Ok(TimeEntryContent::named(NameContent::new(name), certainty))
        }
    }
}

fn month_number(name: &str) -> u32 {
    match name.get(..3).map(str::to_lowercase).as_deref() {
        Some("jan") => 1,
        Some("feb") => 2,
        Some("mar") => 3,
        Some("apr") => 4,
        Some("may") => 5,
        Some("jun") => 6,
        Some("jul") => 7,
        Some("aug") => 8,
        Some("sep") => 9,
        Some("oct") => 10,
        Some("nov") => 11,
        _ => 12,
    }
}

/// Rewrite month-name dates as `YYYY-MM[-DD]`.
fn substitute_month(text: &str) -> Option<String> {
    let ymd = |y: &str, m: &str, d: Option<&str>| {
        let mut iso = format!("{y:0>4}-{:02}", month_number(m));
        if let Some(d) = d {
            iso.push_str(&format!("-{d:0>2}"));
        }
        iso
    };
    if let Some(c) = YEAR_MONTH_DAY.captures(text) {
        return Some(ymd(&c[1], &c[2], Some(&c[3])));
    }
    if let Some(c) = MONTH_DAY_YEAR.captures(text) {
        return Some(ymd(&c[3], &c[1], Some(&c[2])));
    }
    if let Some(c) = DAY_MONTH_YEAR.captures(text) {
        return Some(ymd(&c[3], &c[2], Some(&c[1])));
    }
    if let Some(c) = MONTH_YEAR.captures(text) {
        return Some(ymd(&c[2], &c[1], None));
    }
    YEAR_MONTH.captures(text).map(|c| ymd(&c[1], &c[2], None))
}

/// Parse partial ISO-8601 into numeric parts.
fn parse_iso(text: &str) -> Option<Vec<TimePart>> {
    let caps = ISO.captures(text)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u8>().ok());

    let mut parts = vec![TimePart::Year(caps[1].parse().ok()?)];
    let slots: [(usize, fn(u8) -> TimePart); 5] = [
        (2, TimePart::Month),
        (3, TimePart::Day),
        (4, TimePart::Hour),
        (5, TimePart::Minute),
        (6, TimePart::Second),
    ];
    for (group, make) in slots {
        if let Some(value) = number(group) {
            parts.push(make(value));
        }
    }
    if let Some(fraction) = caps.get(7) {
        let digits: String = fraction.as_str().chars().take(3).collect();
        parts.push(TimePart::Milliseconds(format!("{digits:0<3}").parse().ok()?));
    }
    if let Some(zone) = caps.get(8) {
        if zone.as_str() == "Z" {
            parts.push(TimePart::TzHour(0));
        } else {
            let sign: i8 = if &caps[9] == "-" { -1 } else { 1 };
            parts.push(TimePart::TzHour(sign * caps[10].parse::<i8>().ok()?));
            if let Some(minute) = caps.get(11) {
                parts.push(TimePart::TzMinute(sign * minute.as_str().parse::<i8>().ok()?));
            }
        }
    }
    Some(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xobis::time::TimeEntryBody;
    use proptest::prelude::*;

    fn instance(time: &TimeOrDurationRef) -> &TimeEntryPart {
        match time {
            TimeOrDurationRef::Time(t) => &t.entry,
            TimeOrDurationRef::Duration(_) => panic!("expected an instance, got {time:?}"),
        }
    }

    fn duration(time: &TimeOrDurationRef) -> (&TimeEntryPart, &TimeEntryPart) {
        match time {
            TimeOrDurationRef::Duration(d) => (&d.start, &d.end),
            TimeOrDurationRef::Time(_) => panic!("expected a duration, got {time:?}"),
        }
    }

    fn type_title(part: &TimeEntryPart) -> Option<&str> {
        part.entry_type.as_ref().map(GenericType::title)
    }

    #[test]
    fn test_approximate_beats_estimated() {
        let time = parse("approximately 1851?", DateContext::General).unwrap();
        let part = instance(&time);
        assert_eq!(part.content.certainty, Some(Certainty::Approximate));
        assert_eq!(part.content.to_iso().as_deref(), Some("1851"));
    }

    #[test]
    fn test_certainty_markers() {
        let estimated = parse("1851?", DateContext::General).unwrap();
        assert_eq!(instance(&estimated).content.certainty, Some(Certainty::Estimated));
        let implied = parse("[1851]", DateContext::General).unwrap();
        assert_eq!(instance(&implied).content.certainty, Some(Certainty::Implied));
        let exact = parse("1851.", DateContext::General).unwrap();
        assert_eq!(instance(&exact).content.certainty, None);
        let circa = parse("ca. 1700", DateContext::General).unwrap();
        assert_eq!(instance(&circa).content.certainty, Some(Certainty::Approximate));
    }

    #[test]
    fn test_open_lifespan() {
        let time = parse("1820-", DateContext::Lifespan).unwrap();
        let (start, end) = duration(&time);
        assert_eq!(start.content.year_value(), Some(1820));
        assert_eq!(type_title(start), Some("Born"));
        assert_eq!(end.content.name().map(|n| n.text.as_str()), Some("Present"));
        assert_eq!(type_title(end), None);
    }

    #[test]
    fn test_closed_lifespan() {
        let time = parse("1920-1980", DateContext::Lifespan).unwrap();
        let (start, end) = duration(&time);
        assert_eq!(type_title(start), Some("Born"));
        assert_eq!(type_title(end), Some("Died"));
        assert_eq!(end.content.year_value(), Some(1980));

        let general = parse("1920-1980", DateContext::General).unwrap();
        let (start, _) = duration(&general);
        assert_eq!(type_title(start), None);
    }

    #[test]
    fn test_born_and_died_keywords() {
        let born = parse("b. 1820", DateContext::General).unwrap();
        let (start, end) = duration(&born);
        assert_eq!(type_title(start), Some("Born"));
        assert_eq!(end.content.name().map(|n| n.text.as_str()), Some("Unknown"));

        let died = parse("died 1890", DateContext::Lifespan).unwrap();
        let (start, end) = duration(&died);
        assert_eq!(start.content.name().map(|n| n.text.as_str()), Some("Unknown"));
        assert_eq!(type_title(start), None);
        assert_eq!(type_title(end), Some("Died"));
    }

    #[test]
    fn test_active_applies_to_every_entry() {
        let time = parse("fl. 1720-1750", DateContext::Lifespan).unwrap();
        let (start, end) = duration(&time);
        assert_eq!(type_title(start), Some("Active"));
        assert_eq!(type_title(end), Some("Active"));
    }

    #[test]
    fn test_before_common_era() {
        let time = parse("44 B.C.", DateContext::General).unwrap();
        let part = instance(&time);
        assert_eq!(part.content.parts(), &[TimePart::Year(-44)]);
        assert_eq!(part.content.to_element().child("year").map(|e| e.text()), Some("-0044".to_string()));

        let range = parse("500-400 B.C.", DateContext::General).unwrap();
        let (start, end) = duration(&range);
        assert_eq!(start.content.year_value(), Some(-500));
        assert_eq!(end.content.year_value(), Some(-400));
    }

    #[test]
    fn test_common_era_marker_removed() {
        let time = parse("1200 A.D.", DateContext::General).unwrap();
        assert_eq!(instance(&time).content.year_value(), Some(1200));
    }

    #[test]
    fn test_double_dates() {
        let time = parse("1983/84-1984/85", DateContext::General).unwrap();
        let (start, end) = duration(&time);
        assert_eq!(start.content.year_value(), Some(1983));
        assert_eq!(start.second.as_ref().and_then(TimeEntryContent::year_value), Some(1984));
        assert_eq!(end.content.year_value(), Some(1984));
        assert_eq!(end.second.as_ref().and_then(TimeEntryContent::year_value), Some(1985));
    }

    #[test]
    fn test_or_forces_estimated() {
        let time = parse("1650 or 51", DateContext::General).unwrap();
        let part = instance(&time);
        assert_eq!(part.content.certainty, Some(Certainty::Estimated));
        assert_eq!(part.second.as_ref().and_then(TimeEntryContent::year_value), Some(1651));
    }

    #[test]
    fn test_two_digit_range_tail() {
        let time = parse("1983-84", DateContext::General).unwrap();
        let (_, end) = duration(&time);
        assert_eq!(end.content.year_value(), Some(1984));

        let crossing = parse("1998-02", DateContext::General).unwrap();
        assert!(!crossing.is_duration());
        let crossing = parse("1998-15", DateContext::General).unwrap();
        let (_, end) = duration(&crossing);
        assert_eq!(end.content.year_value(), Some(2015));
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let time = parse("1900-1850", DateContext::General).unwrap();
        let (start, end) = duration(&time);
        assert_eq!(start.content.year_value(), Some(1850));
        assert_eq!(end.content.year_value(), Some(1900));
    }

    #[test]
    fn test_iso_with_time_and_zone() {
        let time = parse("2003-04-05T10:30:15.5Z", DateContext::General).unwrap();
        let parts = instance(&time).content.parts().to_vec();
        assert!(parts.contains(&TimePart::TzHour(0)));
        assert!(parts.contains(&TimePart::Milliseconds(500)));
        assert!(parts.contains(&TimePart::Day(5)));

        let offset = parse("2003-04-05T10:30-05:30", DateContext::General).unwrap();
        let parts = instance(&offset).content.parts().to_vec();
        assert!(parts.contains(&TimePart::TzHour(-5)));
        assert!(parts.contains(&TimePart::TzMinute(-30)));

        let half_hour_west = parse("2000-01-01T01:00-00:30", DateContext::General).unwrap();
        let parts = instance(&half_hour_west).content.parts().to_vec();
        assert!(parts.contains(&TimePart::TzHour(0)));
        assert!(parts.contains(&TimePart::TzMinute(-30)));
        assert_eq!(
            instance(&half_hour_west).content.to_iso().as_deref(),
            Some("2000-01-01T01:00-00:30")
        );
    }

    #[test]
    fn test_month_names() {
        for text in ["1990 May 12", "May 12, 1990", "12 May 1990"] {
            let time = parse(text, DateContext::General).unwrap();
            assert_eq!(instance(&time).content.to_iso().as_deref(), Some("1990-05-12"), "{text}");
        }
        let time = parse("Sept. 1990", DateContext::General).unwrap();
        assert_eq!(instance(&time).content.to_iso().as_deref(), Some("1990-09"));
    }

    #[test]
    fn test_placeholders_and_named_periods() {
        let decade = parse("199-", DateContext::General).unwrap();
        assert_eq!(instance(&decade).content.name().map(|n| n.text.as_str()), Some("199-"));
        let century = parse("19--?", DateContext::General).unwrap();
        assert!(!century.is_duration());

        let named = parse("19th century", DateContext::General).unwrap();
        assert!(matches!(instance(&named).content.body, TimeEntryBody::Named(_)));
    }

    #[test]
    fn test_short_years_are_padded() {
        let time = parse("476", DateContext::General).unwrap();
        assert_eq!(instance(&time).content.to_iso().as_deref(), Some("0476"));
    }

    #[test]
    fn test_arabic_input() {
        let time = parse("حوالي ١٨٥١", DateContext::General).unwrap();
        let part = instance(&time);
        assert_eq!(part.content.year_value(), Some(1851));
        assert_eq!(part.content.certainty, Some(Certainty::Approximate));

        let hijri = parse("1300 هـ", DateContext::General).unwrap();
        assert_eq!(instance(&hijri).calendar.as_deref(), Some(HIJRI));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(parse("", DateContext::General), Err(XobisError::InvalidDate(_))));
        assert!(matches!(parse(" ?. ", DateContext::General), Err(XobisError::InvalidDate(_))));
        assert!(matches!(parse("1990-13-45", DateContext::General), Err(XobisError::InvalidDate(_))));
    }

    #[test]
    fn test_span() {
        let parser = DateTimeParser::new();
        let span = parser.parse_span(Some("1990"), Some("1995")).unwrap();
        let (start, end) = duration(&span);
        assert_eq!(start.content.year_value(), Some(1990));
        assert_eq!(end.content.year_value(), Some(1995));
        assert!(!parser.parse_span(Some("1990"), None).unwrap().is_duration());
        assert!(parser.parse_span(None, None).is_err());
    }

    fn numeric_content() -> impl Strategy<Value = TimeEntryContent> {
        (
            -9999i32..=9999,
            0usize..=6,
            (1u8..=12, 1u8..=28, 0u8..=23, 0u8..=59, 0u8..=59, 0u16..=999),
            prop::option::of((any::<bool>(), 0i8..=12, prop::option::of(0i8..=59))),
        )
            .prop_map(|(year, depth, (mo, d, h, mi, s, ms), zone)| {
                let mut parts = vec![TimePart::Year(year)];
                let chain = [
                    TimePart::Month(mo),
                    TimePart::Day(d),
                    TimePart::Hour(h),
                    TimePart::Minute(mi),
                    TimePart::Second(s),
                    TimePart::Milliseconds(ms),
                ];
                parts.extend(chain.iter().take(depth).copied());
                if depth >= 3 {
                    if let Some((west, zh, zm)) = zone {
                        let sign = if west { -1 } else { 1 };
                        parts.push(TimePart::TzHour(sign * zh));
                        if let Some(zm) = zm {
                            parts.push(TimePart::TzMinute(sign * zm));
                        }
                    }
                }
                TimeEntryContent::numeric(parts, None).unwrap()
            })
    }

    proptest! {
        #[test]
        fn test_iso_round_trip(content in numeric_content()) {
            let iso = content.to_iso().unwrap();
            prop_assert_eq!(parse_entry_content(&iso).unwrap(), content);
        }
    }
}
