//! Date repair for task spans.
//!
//! Calendar exports regularly omit DTEND or emit an end before the start
//! (timezone-corrupted exports). Every task the planner stores goes through
//! [`normalize`] so that `end >= start` always holds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A start/end pair with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Build a valid span from possibly missing or inverted timestamps.
///
/// - missing start: `now`
/// - missing end: zero-length span at start
/// - end before start: clamped to start
pub fn normalize(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> DateSpan {
    let start = start.unwrap_or(now);
    let end = match end {
        Some(end) if end >= start => end,
        _ => start,
    };

    DateSpan { start, end }
}

impl DateSpan {
    /// Re-apply the normalization rules. A no-op on any span built by [`normalize`].
    pub fn normalized(self) -> DateSpan {
        normalize(Some(self.start), Some(self.end), self.start)
    }

    /// Span as drawn on the Gantt chart. Bars need a visible width, so a
    /// zero-length span is widened to one day. Never persisted.
    pub fn for_display(&self) -> DateSpan {
        if self.end <= self.start {
            DateSpan {
                start: self.start,
                end: self.start + Duration::days(1),
            }
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_missing_end_is_zero_length() {
        let span = normalize(Some(day(10)), None, day(1));
        assert_eq!(span.start, day(10));
        assert_eq!(span.end, day(10));
    }

    #[test]
    fn test_inverted_end_is_clamped_to_start() {
        let span = normalize(Some(day(10)), Some(day(9)), day(1));
        assert_eq!(span.end, day(10));
    }

    #[test]
    fn test_valid_end_is_kept() {
        let span = normalize(Some(day(10)), Some(day(24)), day(1));
        assert_eq!(span, DateSpan { start: day(10), end: day(24) });
    }

    #[test]
    fn test_missing_start_defaults_to_now() {
        let span = normalize(None, None, day(3));
        assert_eq!(span, DateSpan { start: day(3), end: day(3) });

        // An end that precedes "now" is clamped as well
        let span = normalize(None, Some(day(2)), day(3));
        assert_eq!(span.end, day(3));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            (Some(day(10)), None),
            (Some(day(10)), Some(day(9))),
            (Some(day(10)), Some(day(20))),
            (None, Some(day(20))),
            (None, None),
        ];

        for (start, end) in inputs {
            let once = normalize(start, end, day(5));
            assert!(once.end >= once.start);
            assert_eq!(once.normalized(), once);
            assert_eq!(normalize(Some(once.start), Some(once.end), day(28)), once);
        }
    }

    #[test]
    fn test_display_span_widens_zero_length() {
        let span = normalize(Some(day(10)), None, day(1)).for_display();
        assert_eq!(span.end, day(11));

        let long = DateSpan { start: day(10), end: day(20) };
        assert_eq!(long.for_display(), long);
    }
}
