//! Calendar events as read from an ICS file.
//!
//! These only live for the duration of one import. The parser produces them,
//! the batch assembler turns them into tasks.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A VEVENT reduced to the fields the planner cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

impl CalendarEvent {
    pub fn new(summary: impl Into<String>, start: EventTime, end: Option<EventTime>) -> Self {
        CalendarEvent {
            summary: Some(summary.into()),
            start: Some(start),
            end,
        }
    }

    /// Summary if present and not blank.
    pub fn title(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Event time, keeping the flavour the ICS file used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    /// All-day value (VALUE=DATE)
    Date(NaiveDate),
    /// Absolute instant (trailing Z)
    DateTimeUtc(DateTime<Utc>),
    /// Local time with no zone attached
    DateTimeFloating(NaiveDateTime),
    /// Local time in a named zone (TZID parameter)
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// Resolve to a UTC instant.
    ///
    /// Dates become midnight UTC and floating times are read as UTC. Zoned
    /// times go through the IANA database; zone ids it does not know (Outlook
    /// exports Windows names like "Romance Standard Time") fall back to UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
            EventTime::DateTimeUtc(dt) => *dt,
            EventTime::DateTimeFloating(dt) => dt.and_utc(),
            EventTime::DateTimeZoned { datetime, tzid } => match tzid.parse::<Tz>() {
                Ok(tz) => tz
                    .from_local_datetime(datetime)
                    .earliest()
                    // Skipped by a spring-forward jump: read as the same wall
                    // time an hour later, i.e. just after the jump
                    .or_else(|| tz.from_local_datetime(&(*datetime + Duration::hours(1))).earliest())
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|| {
                        tracing::warn!(tzid = %tzid, %datetime, "local time does not exist, reading as UTC");
                        datetime.and_utc()
                    }),
                Err(_) => {
                    tracing::warn!(tzid = %tzid, "unknown time zone, reading time as UTC");
                    datetime.and_utc()
                }
            },
        }
    }
}

impl std::fmt::Display for EventTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::DateTimeUtc(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M UTC")),
            EventTime::DateTimeFloating(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
            EventTime::DateTimeZoned { datetime, tzid } => {
                write!(f, "{} ({})", datetime.format("%Y-%m-%d %H:%M"), tzid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_date_resolves_to_midnight_utc() {
        let time = EventTime::Date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_zoned_time_uses_iana_offset() {
        let time = EventTime::DateTimeZoned {
            datetime: naive(2025, 1, 10, 10, 0),
            tzid: "Europe/Madrid".to_string(),
        };
        // CET is UTC+1 in January
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_time_in_dst_gap_lands_after_the_jump() {
        // Madrid clocks jump from 02:00 to 03:00 on 2025-03-30
        let time = EventTime::DateTimeZoned {
            datetime: naive(2025, 3, 30, 2, 30),
            tzid: "Europe/Madrid".to_string(),
        };
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_zone_falls_back_to_utc() {
        let time = EventTime::DateTimeZoned {
            datetime: naive(2025, 1, 10, 10, 0),
            tzid: "Romance Standard Time".to_string(),
        };
        assert_eq!(
            time.to_utc(),
            Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_title_ignores_blank_summary() {
        for summary in ["", " ", "\n", "\t \r\n"] {
            let event = CalendarEvent {
                summary: Some(summary.to_string()),
                ..Default::default()
            };
            assert_eq!(event.title(), None, "{:?}", summary);
        }

        let event = CalendarEvent {
            summary: Some(" PEC1 ".into()),
            ..Default::default()
        };
        assert_eq!(event.title(), Some(" PEC1 "));
    }
}
