//! Tests for marker normalization into the reference timezone.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Paris;
use dispo_engine::feed::RawEvent;
use dispo_engine::normalize::{localize, normalize_event};
use icalendar::{CalendarDateTime, DatePerhapsTime};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date_marker(y: i32, m: u32, d: u32) -> DatePerhapsTime {
    DatePerhapsTime::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn floating_marker(y: i32, m: u32, d: u32, h: u32, min: u32) -> DatePerhapsTime {
    DatePerhapsTime::DateTime(CalendarDateTime::Floating(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap(),
    ))
}

fn raw(start: Option<DatePerhapsTime>, end: Option<DatePerhapsTime>) -> RawEvent {
    RawEvent {
        start,
        end,
        summary: "Maths TD".to_string(),
    }
}

// ── Marker kinds ────────────────────────────────────────────────────────────

#[test]
fn full_day_event_normalizes_to_local_midnight() {
    let event = raw(Some(date_marker(2025, 3, 10)), Some(date_marker(2025, 3, 11)));

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(
        interval.start,
        Paris.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap()
    );
    assert_eq!(
        interval.end,
        Paris.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap()
    );
}

#[test]
fn floating_datetime_attaches_reference_zone() {
    let event = raw(
        Some(floating_marker(2025, 1, 15, 14, 0)),
        Some(floating_marker(2025, 1, 15, 15, 30)),
    );

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(
        interval.start,
        Paris.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap()
    );
    assert_eq!(
        interval.end,
        Paris.with_ymd_and_hms(2025, 1, 15, 15, 30, 0).unwrap()
    );
}

#[test]
fn utc_datetime_converts_to_reference_zone() {
    // 13:00 UTC in January is 14:00 in Paris (CET, +1).
    let start = DatePerhapsTime::DateTime(CalendarDateTime::Utc(
        Utc.with_ymd_and_hms(2025, 1, 15, 13, 0, 0).unwrap(),
    ));
    let event = raw(Some(start), None);

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(
        interval.start,
        Paris.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap()
    );
}

#[test]
fn tzid_datetime_converts_to_reference_zone() {
    // 08:00 in New York in January (EST, -5) is 14:00 in Paris (CET, +1).
    let start = DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
        date_time: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        tzid: "America/New_York".to_string(),
    });
    let event = raw(Some(start), None);

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(
        interval.start,
        Paris.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap()
    );
}

#[test]
fn unknown_tzid_makes_event_unusable() {
    let start = DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone {
        date_time: NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
        tzid: "Mars/Olympus_Mons".to_string(),
    });
    let event = raw(Some(start), None);

    assert!(normalize_event(&event, Paris).is_none());
}

// ── Absent and degenerate markers ───────────────────────────────────────────

#[test]
fn event_without_start_is_skipped() {
    let event = raw(None, Some(floating_marker(2025, 1, 15, 15, 30)));

    assert!(normalize_event(&event, Paris).is_none());
}

#[test]
fn absent_end_defaults_to_start() {
    let event = raw(Some(floating_marker(2025, 1, 15, 14, 0)), None);

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(interval.start, interval.end);
}

#[test]
fn end_before_start_is_clamped_to_start() {
    let event = raw(
        Some(floating_marker(2025, 1, 15, 14, 0)),
        Some(floating_marker(2025, 1, 15, 12, 0)),
    );

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(interval.start, interval.end);
    assert_eq!(
        interval.start,
        Paris.with_ymd_and_hms(2025, 1, 15, 14, 0, 0).unwrap()
    );
}

// ── Text unescaping ─────────────────────────────────────────────────────────

#[test]
fn summary_comma_escapes_are_stripped() {
    let mut event = raw(
        Some(floating_marker(2025, 1, 15, 14, 0)),
        Some(floating_marker(2025, 1, 15, 15, 0)),
    );
    event.summary = "Databases\\, Lab".to_string();

    let interval = normalize_event(&event, Paris).unwrap();

    assert_eq!(interval.summary, "Databases, Lab");
}

// ── Wall-clock edge cases ───────────────────────────────────────────────────

#[test]
fn wall_clock_inside_dst_gap_does_not_exist() {
    // Paris springs forward on 2025-03-30: 02:00 jumps to 03:00, so 02:30
    // never happens on that date.
    let naive = NaiveDate::from_ymd_opt(2025, 3, 30)
        .unwrap()
        .and_hms_opt(2, 30, 0)
        .unwrap();

    assert!(localize(naive, Paris).is_none());
}
