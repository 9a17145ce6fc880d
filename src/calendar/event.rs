use chrono::{NaiveDate, NaiveTime};

use super::error::ValidationError;
use crate::theme;

/// Prefix of the ids given to synthetic overflow markers.
pub const OVERFLOW_ID_PREFIX: &str = "more-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hstart: NaiveTime,
    pub hend: NaiveTime,
    pub color: Option<String>,
}

impl Event {
    /// Synthetic "+ View more (N)" placeholder for `date`.
    pub fn overflow_marker(date: NaiveDate, hidden: usize) -> Self {
        let iso = date.format("%Y-%m-%d");
        Self {
            id: format!("{OVERFLOW_ID_PREFIX}{iso}"),
            title: format!("+ View more ({hidden})"),
            start: date,
            end: date,
            hstart: NaiveTime::MIN,
            hend: NaiveTime::MIN,
            color: None,
        }
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Length in days, zero for single-day events. Negative for malformed
    /// events whose end precedes their start.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn time_display(&self) -> String {
        if self.is_single_day() {
            format!("{} - {}", self.hstart.format("%H:%M"), self.hend.format("%H:%M"))
        } else {
            format!(
                "{} {} - {} {}",
                self.start.format("%b %d"),
                self.hstart.format("%H:%M"),
                self.end.format("%b %d"),
                self.hend.format("%H:%M"),
            )
        }
    }
}

/// Event fields as submitted by the form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub hstart: NaiveTime,
    pub hend: NaiveTime,
    pub color: Option<String>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.end < self.start {
            return Err(ValidationError::EndBeforeStart);
        }
        if self.start == self.end && self.hend <= self.hstart {
            return Err(ValidationError::EndTimeNotAfterStart);
        }
        if let Some(color) = &self.color {
            if theme::parse_color(color).is_none() {
                return Err(ValidationError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title.trim().to_string(),
            start: self.start,
            end: self.end,
            hstart: self.hstart,
            hend: self.hend,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Standup".to_string(),
            start: make_date(2024, 6, 10),
            end: make_date(2024, 6, 10),
            hstart: make_time(9, 0),
            hend: make_time(9, 30),
            color: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn test_blank_title_rejected() {
        let d = EventDraft {
            title: "   ".to_string(),
            ..draft()
        };
        assert_eq!(d.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let d = EventDraft {
            end: make_date(2024, 6, 9),
            ..draft()
        };
        assert_eq!(d.validate(), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_same_day_time_order() {
        let equal = EventDraft {
            hend: make_time(9, 0),
            ..draft()
        };
        assert_eq!(equal.validate(), Err(ValidationError::EndTimeNotAfterStart));

        let earlier = EventDraft {
            hend: make_time(8, 0),
            ..draft()
        };
        assert_eq!(earlier.validate(), Err(ValidationError::EndTimeNotAfterStart));
    }

    #[test]
    fn test_multi_day_ignores_time_order() {
        let d = EventDraft {
            end: make_date(2024, 6, 12),
            hstart: make_time(18, 0),
            hend: make_time(8, 0),
            ..draft()
        };
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn test_color_must_parse() {
        let ok = EventDraft {
            color: Some("#ff8800".to_string()),
            ..draft()
        };
        assert_eq!(ok.validate(), Ok(()));

        let bad = EventDraft {
            color: Some("sunset".to_string()),
            ..draft()
        };
        assert_eq!(
            bad.validate(),
            Err(ValidationError::InvalidColor("sunset".to_string()))
        );
    }

    #[test]
    fn test_overflow_marker() {
        let marker = Event::overflow_marker(make_date(2024, 6, 10), 2);
        assert_eq!(marker.id, "more-2024-06-10");
        assert_eq!(marker.title, "+ View more (2)");
        assert!(marker.is_single_day());
    }

    #[test]
    fn test_time_display() {
        let event = draft().into_event("e1".to_string());
        assert_eq!(event.time_display(), "09:00 - 09:30");

        let multi = EventDraft {
            end: make_date(2024, 6, 12),
            ..draft()
        }
        .into_event("e2".to_string());
        assert_eq!(multi.time_display(), "Jun 10 09:00 - Jun 12 09:30");
        assert_eq!(multi.duration_days(), 2);
    }
}
