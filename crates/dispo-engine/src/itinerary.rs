//! Bounded-horizon itinerary extraction.
//!
//! Filters the interval sequence down to the events intersecting
//! `[now, now + horizon)` and maps them to display-ready entries, sorted
//! chronologically.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::feed;
use crate::normalize::NormalizedInterval;

/// One display-ready agenda line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryEntry {
    /// Civil date of the event start in the reference timezone.
    pub date: NaiveDate,
    /// Human day/month label, e.g. "Monday 16 March".
    pub day_label: String,
    /// "HH:MM–HH:MM" range in the reference timezone.
    pub time_range: String,
    pub title: String,
    /// Chronological sort key: the start instant.
    pub sort_key: DateTime<Tz>,
}

/// Events intersecting `[now, now + horizon_days)`, sorted ascending by
/// start instant, stable on ties.
///
/// An event already in progress qualifies (its end is still ahead of
/// `now`); an event starting at or past the horizon does not.
pub fn extract_itinerary(
    intervals: &[NormalizedInterval],
    now: DateTime<Tz>,
    horizon_days: i64,
) -> Vec<ItineraryEntry> {
    let horizon_end = now + Duration::days(horizon_days);

    let mut entries: Vec<ItineraryEntry> = intervals
        .iter()
        .filter(|interval| interval.end > now && interval.start < horizon_end)
        .map(|interval| ItineraryEntry {
            date: interval.start.date_naive(),
            day_label: interval.start.format("%A %d %B").to_string(),
            time_range: format!(
                "{}–{}",
                interval.start.format("%H:%M"),
                interval.end.format("%H:%M")
            ),
            title: interval.summary.clone(),
            sort_key: interval.start,
        })
        .collect();

    entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
    entries
}

/// Load a room's feed and extract its itinerary.
///
/// Any feed failure yields an empty sequence; callers that need to
/// report the failure itself go through status resolution, which is the
/// authority for that.
pub fn itinerary_of_source(
    path: &Path,
    tz: Tz,
    now: DateTime<Tz>,
    horizon_days: i64,
) -> Vec<ItineraryEntry> {
    match feed::load_schedule(path, tz) {
        Ok(intervals) => extract_itinerary(&intervals, now, horizon_days),
        Err(err) => {
            log::debug!("itinerary for {}: {err}", path.display());
            Vec::new()
        }
    }
}
