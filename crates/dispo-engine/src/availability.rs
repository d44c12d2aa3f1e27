//! Ad-hoc time-window availability checks.
//!
//! Used for "is this room free from 08:00 to 10:00" style filters. The
//! overlap predicate is strict: two intervals overlap iff
//! `a.start < b.end && b.start < a.end`, so a query abutting an event's
//! exact boundary does not collide.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveTime};
use chrono_tz::Tz;

use crate::feed;
use crate::normalize::{self, NormalizedInterval};

/// True when no event overlaps `[query_start, query_end)`.
///
/// An empty interval sequence is always available. Callers must pass
/// `query_start < query_end`.
pub fn is_available(
    intervals: &[NormalizedInterval],
    query_start: DateTime<Tz>,
    query_end: DateTime<Tz>,
) -> bool {
    !intervals
        .iter()
        .any(|interval| interval.start < query_end && interval.end > query_start)
}

/// Load a room's feed and check a window against it.
///
/// Fail-safe: any feed failure reports the room as unavailable, unlike
/// status resolution which surfaces an explicit error state.
pub fn availability_of_source(
    path: &Path,
    tz: Tz,
    query_start: DateTime<Tz>,
    query_end: DateTime<Tz>,
) -> bool {
    match feed::load_schedule(path, tz) {
        Ok(intervals) => is_available(&intervals, query_start, query_end),
        Err(err) => {
            log::debug!("availability for {}: {err}", path.display());
            false
        }
    }
}

/// Build today's query window from wall-clock bounds in the reference
/// timezone.
///
/// An end bound earlier than the start rolls over to the next civil day,
/// so a 22:00-02:00 window spans midnight. `None` when either wall-clock
/// does not exist on that date (DST gap).
pub fn clock_window(
    now: DateTime<Tz>,
    from: NaiveTime,
    to: NaiveTime,
) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
    let date = now.date_naive();
    let tz = now.timezone();
    let start = normalize::localize(date.and_time(from), tz)?;
    let mut end = normalize::localize(date.and_time(to), tz)?;
    if end < start {
        end = end + Duration::days(1);
    }
    Some((start, end))
}

/// Build the `[now, now + minutes)` query window.
pub fn duration_window(now: DateTime<Tz>, minutes: i64) -> (DateTime<Tz>, DateTime<Tz>) {
    (now, now + Duration::minutes(minutes))
}
