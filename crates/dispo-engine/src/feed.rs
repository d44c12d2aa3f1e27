//! Calendar feed parsing -- reads an ICS source and produces the
//! normalized interval sequence the analysis components consume.
//!
//! The feed is re-read and re-parsed on every call: results always
//! reflect the latest feed, at the cost of repeated parsing. No state is
//! retained between calls, and parsing is read-only and re-entrant.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent, Component, DatePerhapsTime, EventLike};

use crate::error::{FeedError, Result};
use crate::normalize::{self, NormalizedInterval};

/// A VEVENT as it appears in the feed, before normalization.
///
/// Either marker may be a bare date or a date-time, timezone-naive or
/// timezone-tagged, or absent entirely. Not retained after normalization.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub start: Option<DatePerhapsTime>,
    pub end: Option<DatePerhapsTime>,
    pub summary: String,
}

/// Walk the calendar's VEVENT components as a lazy, single-pass sequence.
/// Non-event components (timezone definitions, todos) are ignored.
pub fn raw_events(calendar: &Calendar) -> impl Iterator<Item = RawEvent> + '_ {
    calendar.components.iter().filter_map(|component| match component {
        CalendarComponent::Event(event) => Some(RawEvent {
            start: event.get_start(),
            end: event.get_end(),
            summary: event.get_summary().unwrap_or_default().to_string(),
        }),
        _ => None,
    })
}

/// Parse an ICS document into the normalized interval sequence.
///
/// Events without a usable start or end are skipped with a warning and
/// the scan continues; a document that is not a well-formed calendar is
/// `SourceUnreadable`.
pub fn parse_schedule(ics: &str, tz: Tz) -> Result<Vec<NormalizedInterval>> {
    let calendar: Calendar = ics
        .parse()
        .map_err(|err: String| FeedError::SourceUnreadable(err))?;

    Ok(raw_events(&calendar)
        .filter_map(|raw| match normalize::normalize_event(&raw, tz) {
            Some(interval) => Some(interval),
            None => {
                log::warn!("skipping event without usable markers: {:?}", raw.summary);
                None
            }
        })
        .collect())
}

/// Read and parse a room's feed from disk.
///
/// A missing file maps to `SourceNotFound`; any other I/O failure, or a
/// byte stream that is not a well-formed calendar, maps to
/// `SourceUnreadable`.
pub fn load_schedule(path: &Path, tz: Tz) -> Result<Vec<NormalizedInterval>> {
    let bytes = fs::read(path).map_err(|err| {
        let source = path.display().to_string();
        if err.kind() == ErrorKind::NotFound {
            FeedError::SourceNotFound(source)
        } else {
            FeedError::SourceUnreadable(format!("{source}: {err}"))
        }
    })?;

    parse_schedule(&String::from_utf8_lossy(&bytes), tz)
}
