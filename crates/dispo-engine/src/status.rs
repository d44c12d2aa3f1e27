//! Point-in-time occupancy resolution.
//!
//! The result is a pure function of `(intervals, now)`, recomputed per
//! call. "Occupied vs free vs error" is conceptual state, not a persisted
//! automaton.

use std::fmt;
use std::path::Path;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::TITLE_MAX_CHARS;
use crate::error::FeedError;
use crate::feed;
use crate::normalize::NormalizedInterval;

/// Occupancy state of a room at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    Occupied,
    Free,
    Error,
}

impl fmt::Display for RoomState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomState::Occupied => "OCCUPIED",
            RoomState::Free => "FREE",
            RoomState::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Display-ready occupancy status, produced fresh per call.
///
/// `progress` is the elapsed share of the current event (0-100) and is
/// only meaningful when `state` is [`RoomState::Occupied`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStatus {
    pub state: RoomState,
    pub headline: String,
    pub sub_text: String,
    pub progress: u8,
}

impl RoomStatus {
    fn free(sub_text: String) -> Self {
        Self {
            state: RoomState::Free,
            headline: "Free".to_string(),
            sub_text,
            progress: 0,
        }
    }

    /// Status shown when the feed itself could not be read, with the
    /// not-found and unreadable cases kept distinguishable.
    pub fn from_feed_error(err: &FeedError) -> Self {
        let sub_text = match err {
            FeedError::SourceNotFound(_) => "source not found",
            FeedError::SourceUnreadable(_) => "source unreadable",
        };
        Self {
            state: RoomState::Error,
            headline: "Error".to_string(),
            sub_text: sub_text.to_string(),
            progress: 0,
        }
    }
}

/// Elapsed share of `[start, end]` at `now`, rounded and clamped to
/// 0-100. A zero-duration interval counts as fully elapsed.
fn progress_percent(interval: &NormalizedInterval, now: DateTime<Tz>) -> u8 {
    let total = (interval.end - interval.start).num_seconds();
    if total <= 0 {
        return 100;
    }
    let elapsed = (now - interval.start).num_seconds();
    ((elapsed as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Truncate an upcoming-event title for display.
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_MAX_CHARS {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(TITLE_MAX_CHARS).collect();
    truncated.push('…');
    truncated
}

/// Resolve the room's occupancy at `now` in a single scan.
///
/// When several events contain `now`, the one with the earliest start
/// wins (first encountered on equal starts). When the room is free, the
/// nearest upcoming event is reported; with events on the schedule but
/// none upcoming, or with no events at all, the sub-text says which.
pub fn resolve_status(intervals: &[NormalizedInterval], now: DateTime<Tz>) -> RoomStatus {
    let mut current: Option<&NormalizedInterval> = None;
    let mut upcoming: Option<&NormalizedInterval> = None;

    for interval in intervals {
        if interval.start <= now && now <= interval.end {
            if current.is_none_or(|held| interval.start < held.start) {
                current = Some(interval);
            }
        } else if interval.start > now && upcoming.is_none_or(|held| interval.start < held.start) {
            upcoming = Some(interval);
        }
    }

    if let Some(event) = current {
        return RoomStatus {
            state: RoomState::Occupied,
            headline: event.summary.clone(),
            sub_text: format!("ends {}", event.end.format("%H:%M")),
            progress: progress_percent(event, now),
        };
    }

    match upcoming {
        Some(next) => RoomStatus::free(format!(
            "next: {} {}",
            next.start.format("%H:%M"),
            truncate_title(&next.summary)
        )),
        None if !intervals.is_empty() => RoomStatus::free("no more events today".to_string()),
        None => RoomStatus::free("empty schedule".to_string()),
    }
}

/// Load a room's feed and resolve its status.
///
/// Feed failures surface as the `Error` state rather than a fault: a
/// corrupt or missing feed degrades to "status unknown" instead of
/// failing the caller.
pub fn status_of_source(path: &Path, tz: Tz, now: DateTime<Tz>) -> RoomStatus {
    match feed::load_schedule(path, tz) {
        Ok(intervals) => resolve_status(&intervals, now),
        Err(err) => {
            log::debug!("status for {}: {err}", path.display());
            RoomStatus::from_feed_error(&err)
        }
    }
}
