//! Benchmarks for the parse-then-resolve hot path.
//!
//! The engine re-parses the feed on every request, so parse throughput
//! dominates a busy listing page.

use std::hint::black_box;

use chrono::TimeZone;
use criterion::{criterion_group, criterion_main, Criterion};
use dispo_engine::{parse_schedule, resolve_status, REFERENCE_TZ};

/// A term's worth of bookings: `count` one-hour events, eight per day.
fn semester_feed(count: u32) -> String {
    let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//dispo//EN\r\n");
    for i in 0..count {
        let day = 1 + (i / 8) % 28;
        let hour = 8 + i % 8;
        ics.push_str(&format!(
            "BEGIN:VEVENT\r\nUID:{i}\r\nDTSTART:202501{day:02}T{hour:02}0000\r\n\
             DTEND:202501{day:02}T{hour:02}5500\r\nSUMMARY:Booking {i}\r\nEND:VEVENT\r\n"
        ));
    }
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

fn bench_engine(c: &mut Criterion) {
    let ics = semester_feed(200);
    c.bench_function("parse_schedule_200_events", |b| {
        b.iter(|| parse_schedule(black_box(&ics), REFERENCE_TZ).unwrap())
    });

    let intervals = parse_schedule(&ics, REFERENCE_TZ).unwrap();
    let now = REFERENCE_TZ.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap();
    c.bench_function("resolve_status_200_events", |b| {
        b.iter(|| resolve_status(black_box(&intervals), now))
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
