//! Interval normalization -- converts raw calendar markers into
//! timezone-aware instants in the reference timezone.
//!
//! A feed may carry a bare calendar date, a floating (timezone-naive)
//! date-time, a UTC date-time, or a date-time tagged with an IANA TZID.
//! All four collapse here into `DateTime<Tz>` pairs so that the status,
//! itinerary, and availability components never branch on marker kinds
//! themselves.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use icalendar::{CalendarDateTime, DatePerhapsTime};
use serde::Serialize;

use crate::feed::RawEvent;

/// A calendar event reduced to a pair of instants in the reference
/// timezone, with `start <= end` guaranteed.
///
/// The `Vec<NormalizedInterval>` built from one parse pass is the finite,
/// restartable sequence every analysis component consumes; it is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedInterval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
}

/// Attach a timezone to a naive local wall-clock time.
///
/// An ambiguous wall-clock (clocks rolled back) resolves to the earliest
/// valid interpretation; a wall-clock inside a DST gap does not exist and
/// yields `None`.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

/// Resolve one raw marker to an instant in the reference timezone.
///
/// Rules, in order: a bare date becomes local midnight (full-day
/// semantics); a floating date-time is taken as reference-zone local
/// time; a UTC or TZID-tagged date-time is converted. An unknown TZID
/// makes the marker unusable.
fn normalize_marker(marker: &DatePerhapsTime, tz: Tz) -> Option<DateTime<Tz>> {
    match marker {
        DatePerhapsTime::Date(date) => localize(date.and_time(NaiveTime::MIN), tz),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Floating(naive) => localize(*naive, tz),
            CalendarDateTime::Utc(utc) => Some(utc.with_timezone(&tz)),
            CalendarDateTime::WithTimezone { date_time, tzid } => {
                let source: Tz = tzid.parse().ok()?;
                Some(localize(*date_time, source)?.with_timezone(&tz))
            }
        },
    }
}

/// Normalize a raw event into an interval in the reference timezone.
///
/// `None` means the event is unusable and must be skipped: it has no
/// start, or a marker that cannot be resolved. An absent end defaults to
/// the start (zero-duration event); an end resolving before the start is
/// clamped to the start.
pub fn normalize_event(raw: &RawEvent, tz: Tz) -> Option<NormalizedInterval> {
    let start = normalize_marker(raw.start.as_ref()?, tz)?;
    let end = match raw.end.as_ref() {
        Some(marker) => normalize_marker(marker, tz)?.max(start),
        None => start,
    };
    Some(NormalizedInterval {
        start,
        end,
        summary: unescape_text(&raw.summary),
    })
}

/// Strip the ICS text-escaping of literal commas.
fn unescape_text(raw: &str) -> String {
    raw.replace("\\,", ",")
}
