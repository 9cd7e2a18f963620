//! ICS file parsing using the icalendar crate's parser.

use crate::error::{PlannerError, PlannerResult};
use crate::event::{CalendarEvent, EventTime};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// Parse ICS content into the VEVENTs it contains, in file order.
///
/// Any structural problem fails the whole file. There is no partial result.
pub fn parse_calendar(content: &str) -> PlannerResult<Vec<CalendarEvent>> {
    let unfolded = unfold(content);

    let opens_calendar = unfolded
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !opens_calendar {
        return Err(PlannerError::IcsParse(
            "content does not start with BEGIN:VCALENDAR".into(),
        ));
    }

    let calendar =
        read_calendar(&unfolded).map_err(|e| PlannerError::IcsParse(e.to_string()))?;

    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect()
}

fn parse_vevent(vevent: &Component<'_>) -> PlannerResult<CalendarEvent> {
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()));

    Ok(CalendarEvent {
        summary,
        start: parse_time(vevent, "DTSTART")?,
        end: parse_time(vevent, "DTEND")?,
    })
}

/// A missing property is fine, an unreadable one is not.
fn parse_time(vevent: &Component<'_>, name: &str) -> PlannerResult<Option<EventTime>> {
    let Some(prop) = vevent.find_prop(name) else {
        return Ok(None);
    };

    let dpt = DatePerhapsTime::try_from(prop).map_err(|_| {
        PlannerError::IcsParse(format!("invalid {} value '{}'", name, prop.val.as_ref()))
    })?;

    Ok(Some(to_event_time(dpt)))
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}

/// Undo RFC 5545 TEXT escaping (`\,` `\;` `\\` `\n`).
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const SEMESTER: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//UOC//Campus//ES\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Madrid\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:pec1@uoc\r\n\
SUMMARY:PEC1 - Bases de datos\r\n\
DTSTART;VALUE=DATE:20250110\r\n\
DTEND;VALUE=DATE:20250124\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:ex@uoc\r\n\
SUMMARY:Examen final\\, Álgebra\r\n\
DTSTART;TZID=Europe/Madrid:20250612T100000\r\n\
END:VEVENT\r\n\
BEGIN:VTODO\r\n\
UID:todo@uoc\r\n\
SUMMARY:Not an event\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn test_parse_extracts_only_vevents_in_order() {
        let events = parse_calendar(SEMESTER).expect("Should parse");

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary.as_deref(), Some("PEC1 - Bases de datos"));
        assert_eq!(
            events[0].start,
            Some(EventTime::Date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()))
        );
        assert_eq!(
            events[0].end,
            Some(EventTime::Date(NaiveDate::from_ymd_opt(2025, 1, 24).unwrap()))
        );
    }

    #[test]
    fn test_parse_unescapes_summary_and_keeps_tzid() {
        let events = parse_calendar(SEMESTER).expect("Should parse");

        assert_eq!(events[1].summary.as_deref(), Some("Examen final, Álgebra"));
        assert_eq!(events[1].end, None);
        match &events[1].start {
            Some(EventTime::DateTimeZoned { tzid, .. }) => assert_eq!(tzid, "Europe/Madrid"),
            other => panic!("Expected DateTimeZoned, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_utc_datetime() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:PRA2\r\n\
DTSTART:20250301T090000Z\r\n\
DTEND:20250301T110000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(
            events[0].start,
            Some(EventTime::DateTimeUtc(
                Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
            ))
        );
    }

    #[test]
    fn test_parse_keeps_events_without_summary() {
        // Filtering summaryless events is the assembler's job
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20250110\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, None);
    }

    #[test]
    fn test_parse_calendar_without_events() {
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
        assert_eq!(parse_calendar(ics).expect("Should parse"), vec![]);
    }

    #[test]
    fn test_parse_rejects_non_calendar_text() {
        let err = parse_calendar("this is not a calendar").unwrap_err();
        assert!(matches!(err, PlannerError::IcsParse(_)));
    }

    #[test]
    fn test_parse_rejects_empty_content() {
        assert!(matches!(
            parse_calendar("").unwrap_err(),
            PlannerError::IcsParse(_)
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_dtstart() {
        let ics = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:PEC3\r\n\
DTSTART:next tuesday\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let err = parse_calendar(ics).unwrap_err();
        assert!(err.to_string().contains("DTSTART"), "got: {}", err);
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text(r"a\, b\; c\\d\ne"), "a, b; c\\d\ne");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }
}
