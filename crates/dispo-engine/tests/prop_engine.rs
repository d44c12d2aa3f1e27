//! Property-based tests for the availability engine using proptest.
//!
//! These verify invariants that should hold for *any* schedule, not just
//! the specific examples in the per-module test files.

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::{Europe::Paris, Tz};
use dispo_engine::availability::is_available;
use dispo_engine::itinerary::extract_itinerary;
use dispo_engine::normalize::NormalizedInterval;
use dispo_engine::status::{resolve_status, RoomState};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies — minute offsets on a fixed January day (no DST nearby)
// ---------------------------------------------------------------------------

fn midnight() -> DateTime<Tz> {
    Paris.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
}

fn minute(offset: i64) -> DateTime<Tz> {
    midnight() + Duration::minutes(offset)
}

fn interval(start_min: i64, duration_min: i64) -> NormalizedInterval {
    NormalizedInterval {
        start: minute(start_min),
        end: minute(start_min + duration_min),
        summary: "Booking".to_string(),
    }
}

fn arb_start() -> impl Strategy<Value = i64> {
    0i64..=1200
}

fn arb_duration() -> impl Strategy<Value = i64> {
    1i64..=240
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Any instant inside an event resolves to OCCUPIED with a progress
    /// value inside 0-100.
    #[test]
    fn occupied_progress_stays_in_bounds(
        start in arb_start(),
        duration in arb_duration(),
        elapsed_raw in 0i64..=10_000,
    ) {
        let elapsed = elapsed_raw % (duration + 1);
        let schedule = vec![interval(start, duration)];

        let status = resolve_status(&schedule, minute(start + elapsed));

        prop_assert_eq!(status.state, RoomState::Occupied);
        prop_assert!(status.progress <= 100);
    }

    /// Progress never decreases as `now` advances within a fixed event.
    #[test]
    fn progress_is_monotone_within_an_event(
        start in arb_start(),
        duration in arb_duration(),
        a_raw in 0i64..=10_000,
        b_raw in 0i64..=10_000,
    ) {
        let mut a = a_raw % (duration + 1);
        let mut b = b_raw % (duration + 1);
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        let schedule = vec![interval(start, duration)];

        let earlier = resolve_status(&schedule, minute(start + a));
        let later = resolve_status(&schedule, minute(start + b));

        prop_assert!(earlier.progress <= later.progress);
    }

    /// A query window abutting an event boundary never collides; shifting
    /// it into the event by any positive amount always does.
    #[test]
    fn boundary_abutment_is_exclusive(
        start in arb_start(),
        duration in arb_duration(),
    ) {
        let schedule = vec![interval(start, duration)];

        prop_assert!(is_available(&schedule, minute(start - 60), minute(start)));
        prop_assert!(is_available(&schedule, minute(start + duration), minute(start + duration + 60)));
        prop_assert!(!is_available(&schedule, minute(start - 60), minute(start + 1)));
        prop_assert!(!is_available(&schedule, minute(start + duration - 1), minute(start + duration + 60)));
    }

    /// Itinerary output is sorted ascending by start for any input order.
    #[test]
    fn itinerary_is_always_sorted(
        starts in prop::collection::vec(arb_start(), 0..12),
    ) {
        let schedule: Vec<NormalizedInterval> =
            starts.iter().map(|&s| interval(s, 30)).collect();

        let entries = extract_itinerary(&schedule, midnight(), 2);

        prop_assert_eq!(entries.len(), schedule.len());
        for pair in entries.windows(2) {
            prop_assert!(pair[0].sort_key <= pair[1].sort_key);
        }
    }
}
