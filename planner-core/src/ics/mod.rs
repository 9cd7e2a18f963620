//! ICS file parsing.
//!
//! This module reads .ics files according to RFC 5545 and reduces each
//! VEVENT to a [`CalendarEvent`](crate::event::CalendarEvent).

mod parse;

pub use parse::parse_calendar;
