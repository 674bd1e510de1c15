//! Builders for time instance and duration refs.

use crate::error::{Result, XobisError};
use crate::xobis::{
    GenericType, LinkAttributes, TimeEntryContent, TimeEntryPart, TimeOrDurationRef, TimeRef,
    DurationRef,
};

#[derive(Debug, Clone, Default)]
struct PartSlot {
    scheme: Option<String>,
    calendar: Option<String>,
    entry_type: Option<GenericType>,
    content: Option<TimeEntryContent>,
    second: Option<TimeEntryContent>,
}

impl PartSlot {
    fn build(self, which: &str) -> Result<TimeEntryPart> {
        let content = self
            .content
            .ok_or_else(|| XobisError::Invariant(format!("{which} time entry has no content")))?;
        Ok(TimeEntryPart {
            scheme: self.scheme,
            calendar: self.calendar,
            entry_type: self.entry_type,
            content,
            second: self.second,
        })
    }
}

/// Builds a [`TimeRef`].
///
/// # Examples
///
/// ```ignore
/// let mut builder = TimeRefBuilder::new();
/// builder
///     .set_calendar("Hijri")
///     .set_time_entry_content(TimeEntryContent::year(1400, None)?);
/// let time = builder.build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimeRefBuilder {
    link: Option<LinkAttributes>,
    part: PartSlot,
}

impl TimeRefBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link to a Time record.
    pub fn set_link(&mut self, link: Option<LinkAttributes>) -> &mut Self {
        self.link = link;
        self
    }

    /// Set the scheme.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.part.scheme = Some(scheme.into());
        self
    }

    /// Set the calendar.
    pub fn set_calendar(&mut self, calendar: impl Into<String>) -> &mut Self {
        self.part.calendar = Some(calendar.into());
        self
    }

    /// Set the entry type.
    pub fn set_type(&mut self, entry_type: Option<GenericType>) -> &mut Self {
        self.part.entry_type = entry_type;
        self
    }

    /// Set the content.
    pub fn set_time_entry_content(&mut self, content: TimeEntryContent) -> &mut Self {
        self.part.content = Some(content);
        self
    }

    /// Set the second content of a double date.
    pub fn set_second_time_entry_content(&mut self, content: TimeEntryContent) -> &mut Self {
        self.part.second = Some(content);
        self
    }

    /// Build the ref.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] when no content was set.
    pub fn build(self) -> Result<TimeRef> {
        Ok(TimeRef {
            link: self.link,
            entry: self.part.build("instance")?,
        })
    }
}

/// Builds a [`DurationRef`] from a start and an end part.
///
/// Scheme and calendar set with [`Self::set_scheme`] and
/// [`Self::set_calendar`] apply to both ends unless an end sets its own.
#[derive(Debug, Clone, Default)]
pub struct DurationRefBuilder {
    link: Option<LinkAttributes>,
    scheme: Option<String>,
    calendar: Option<String>,
    start: PartSlot,
    end: PartSlot,
}

impl DurationRefBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the link to a Time record.
    pub fn set_link(&mut self, link: Option<LinkAttributes>) -> &mut Self {
        self.link = link;
        self
    }

    /// Set the scheme of both ends.
    pub fn set_scheme(&mut self, scheme: impl Into<String>) -> &mut Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set the calendar of both ends.
    pub fn set_calendar(&mut self, calendar: impl Into<String>) -> &mut Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Set the calendar of the end only.
    pub fn set_end_calendar(&mut self, calendar: impl Into<String>) -> &mut Self {
        self.end.calendar = Some(calendar.into());
        self
    }

    /// Set the start type.
    pub fn set_start_type(&mut self, entry_type: Option<GenericType>) -> &mut Self {
        self.start.entry_type = entry_type;
        self
    }

    /// Set the end type.
    pub fn set_end_type(&mut self, entry_type: Option<GenericType>) -> &mut Self {
        self.end.entry_type = entry_type;
        self
    }

    /// Set the start content, and its second content for a double date.
    pub fn set_start_content(
        &mut self,
        content: TimeEntryContent,
        second: Option<TimeEntryContent>,
    ) -> &mut Self {
        self.start.content = Some(content);
        self.start.second = second;
        self
    }

    /// Set the end content, and its second content for a double date.
    pub fn set_end_content(
        &mut self,
        content: TimeEntryContent,
        second: Option<TimeEntryContent>,
    ) -> &mut Self {
        self.end.content = Some(content);
        self.end.second = second;
        self
    }

    /// Build the ref.
    ///
    /// # Errors
    ///
    /// Returns [`XobisError::Invariant`] when either end has no content.
    pub fn build(self) -> Result<DurationRef> {
        let DurationRefBuilder {
            link,
            scheme,
            calendar,
            mut start,
            mut end,
        } = self;
        for slot in [&mut start, &mut end] {
            if slot.scheme.is_none() {
                slot.scheme.clone_from(&scheme);
            }
            if slot.calendar.is_none() {
                slot.calendar.clone_from(&calendar);
            }
        }
        Ok(DurationRef {
            link,
            start: start.build("start")?,
            end: end.build("end")?,
        })
    }
}

/// Build a time or duration from one or two parts, sharing a calendar.
///
/// # Errors
///
/// Fails when a part has no content.
pub fn time_or_duration(
    parts: Vec<(Option<GenericType>, TimeEntryContent, Option<TimeEntryContent>)>,
    calendar: Option<&str>,
) -> Result<TimeOrDurationRef> {
    let mut parts = parts.into_iter();
    let (first, second) = (parts.next(), parts.next());
    match (first, second) {
        (Some((entry_type, content, double)), None) => {
            let mut builder = TimeRefBuilder::new();
            builder.set_type(entry_type).set_time_entry_content(content);
            if let Some(double) = double {
                builder.set_second_time_entry_content(double);
            }
            if let Some(calendar) = calendar {
                builder.set_calendar(calendar);
            }
            Ok(TimeOrDurationRef::Time(builder.build()?))
        }
        (Some((start_type, start, start_double)), Some((end_type, end, end_double))) => {
            let mut builder = DurationRefBuilder::new();
            builder
                .set_start_type(start_type)
                .set_start_content(start, start_double)
                .set_end_type(end_type)
                .set_end_content(end, end_double);
            if let Some(calendar) = calendar {
                builder.set_calendar(calendar);
            }
            Ok(TimeOrDurationRef::Duration(builder.build()?))
        }
        _ => Err(XobisError::Invariant("time has no entries".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ref_needs_content() {
        assert!(TimeRefBuilder::new().build().is_err());
        let mut builder = TimeRefBuilder::new();
        builder.set_time_entry_content(TimeEntryContent::year(1900, None).unwrap());
        let time = builder.build().unwrap();
        assert_eq!(time.entry.content.year_value(), Some(1900));
        assert!(time.link.is_none());
    }

    #[test]
    fn test_duration_shares_calendar() {
        let mut builder = DurationRefBuilder::new();
        builder
            .set_calendar("Hijri")
            .set_end_calendar("Gregorian")
            .set_start_content(TimeEntryContent::year(1300, None).unwrap(), None)
            .set_end_content(TimeEntryContent::year(1400, None).unwrap(), None);
        let duration = builder.build().unwrap();
        assert_eq!(duration.start.calendar.as_deref(), Some("Hijri"));
        assert_eq!(duration.end.calendar.as_deref(), Some("Gregorian"));
    }

    #[test]
    fn test_duration_needs_both_ends() {
        let mut builder = DurationRefBuilder::new();
        builder.set_start_content(TimeEntryContent::year(1300, None).unwrap(), None);
        assert!(matches!(builder.build(), Err(XobisError::Invariant(_))));
    }

    #[test]
    fn test_time_or_duration() {
        let single = time_or_duration(
            vec![(None, TimeEntryContent::year(1820, None).unwrap(), None)],
            None,
        )
        .unwrap();
        assert!(!single.is_duration());

        let pair = time_or_duration(
            vec![
                (Some(GenericType::titled("Born")), TimeEntryContent::year(1820, None).unwrap(), None),
                (None, TimeEntryContent::year(1900, None).unwrap(), None),
            ],
            Some("Hijri"),
        )
        .unwrap();
        assert!(pair.is_duration());
        assert!(time_or_duration(Vec::new(), None).is_err());
    }
}
