//! `dispo` CLI -- query a room's calendar feed from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Current occupancy of a room feed
//! dispo status -f salle-204.ics
//!
//! # Status at a fixed reference-timezone wall clock (for kiosks and tests)
//! dispo status -f salle-204.ics --at 2026-03-16T14:45
//!
//! # Agenda over the next 7 days
//! dispo agenda -f salle-204.ics --days 7
//!
//! # Is the room free between 08:00 and 10:00 today?
//! dispo check -f salle-204.ics --from 08:00 --to 10:00
//!
//! # Is the room free for the next 90 minutes?
//! dispo check -f salle-204.ics --minutes 90
//!
//! # Floor/wing heuristic, with optional manual overrides
//! dispo locate 204 --rooms rooms.json
//!
//! # Incident reports
//! dispo report 204 --kind projector --desc "lamp dead" --store reports.json
//! dispo reports 204 --store reports.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use simplelog::{Config, LevelFilter, SimpleLogger};

use dispo_engine::{
    availability_of_source, clock_window, duration_window, itinerary_of_source, load_directory,
    localize, locate, status_of_source, EngineConfig, JsonReportStore, Report, ReportStore,
    RoomState,
};

#[derive(Parser)]
#[command(name = "dispo", version, about = "Room availability from iCalendar feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration document (JSON: timezone, horizon_days)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Current occupancy status of a room feed
    Status {
        /// Path to the room's .ics feed
        #[arg(short, long)]
        feed: PathBuf,
        /// Evaluate at this local datetime instead of now (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Upcoming events within the horizon
    Agenda {
        /// Path to the room's .ics feed
        #[arg(short, long)]
        feed: PathBuf,
        /// Horizon in days (defaults to the configured horizon)
        #[arg(long)]
        days: Option<i64>,
        /// Evaluate at this local datetime instead of now (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Check whether a time window is free
    Check {
        /// Path to the room's .ics feed
        #[arg(short, long)]
        feed: PathBuf,
        /// Window start wall-clock (HH:MM)
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Window end wall-clock (HH:MM); earlier than --from rolls past midnight
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Window of N minutes starting now (alternative to --from/--to)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        minutes: Option<i64>,
        /// Evaluate at this local datetime instead of now (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        at: Option<String>,
    },
    /// Infer a room's floor and wing
    Locate {
        /// Room identifier, e.g. "204" or "A1"
        room: String,
        /// JSON document of manual per-room overrides
        #[arg(long)]
        rooms: Option<PathBuf>,
    },
    /// File an incident report for a room
    Report {
        /// Room identifier
        room: String,
        /// Problem category, e.g. projector, pc, heating
        #[arg(long)]
        kind: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        desc: String,
        /// Reporter name recorded with the report
        #[arg(long, default_value = "public")]
        author: String,
        /// Report store document
        #[arg(long, default_value = "reports.json")]
        store: PathBuf,
    },
    /// List a room's incident reports, newest first
    Reports {
        /// Room identifier
        room: String,
        /// Report store document
        #[arg(long, default_value = "reports.json")]
        store: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let tz = config.timezone;

    match cli.command {
        Commands::Status { feed, at } => {
            let now = resolve_now(at.as_deref(), tz)?;
            let status = status_of_source(&feed, tz, now);

            println!("State:     {}", status.state);
            println!("Headline:  {}", status.headline);
            println!("Info:      {}", status.sub_text);
            if status.state == RoomState::Occupied {
                println!("Progress:  {}%", status.progress);
            }
        }
        Commands::Agenda { feed, days, at } => {
            let now = resolve_now(at.as_deref(), tz)?;
            let days = days.unwrap_or(config.horizon_days);
            let entries = itinerary_of_source(&feed, tz, now, days);

            if entries.is_empty() {
                println!("No events in the next {days} days.");
            }
            for entry in &entries {
                println!("{}  {}  {}", entry.date, entry.time_range, entry.title);
            }
        }
        Commands::Check {
            feed,
            from,
            to,
            minutes,
            at,
        } => {
            let now = resolve_now(at.as_deref(), tz)?;
            let (start, end) = match (from.as_deref(), to.as_deref(), minutes) {
                (_, _, Some(minutes)) => {
                    if minutes <= 0 {
                        bail!("--minutes must be positive");
                    }
                    duration_window(now, minutes)
                }
                (Some(from), Some(to), None) => {
                    let window = clock_window(now, parse_clock(from)?, parse_clock(to)?);
                    window.context("window wall-clock does not exist on this date")?
                }
                _ => bail!("provide either --from/--to or --minutes"),
            };

            let free = availability_of_source(&feed, tz, start, end);
            println!("{}", if free { "available" } else { "unavailable" });
        }
        Commands::Locate { room, rooms } => {
            let directory = rooms.as_deref().map(load_directory).unwrap_or_default();
            let meta = directory.get(&room).cloned().unwrap_or_default();
            let (floor, wing) = locate(&room, &meta);

            println!("Floor: {floor}");
            println!("Wing:  {wing}");
        }
        Commands::Report {
            room,
            kind,
            desc,
            author,
            store,
        } => {
            let store = JsonReportStore::new(store);
            store
                .append(
                    &room,
                    Report {
                        kind,
                        description: desc,
                        author,
                        reported_at: Utc::now(),
                    },
                )
                .context("failed to record report")?;
            println!("Report recorded for {room}.");
        }
        Commands::Reports { room, store } => {
            let store = JsonReportStore::new(store);
            let reports = store.get(&room).context("failed to read report store")?;

            if reports.is_empty() {
                println!("No reports for {room}.");
            }
            for report in &reports {
                println!(
                    "{}  [{}] {}: {}",
                    report.reported_at.format("%Y-%m-%d %H:%M"),
                    report.kind,
                    report.author,
                    report.description
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = SimpleLogger::init(level, Config::default());
}

/// Engine configuration: the given document, or built-in defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config document: {}", path.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Reference-timezone instant the query runs at: the `--at` wall clock
/// when given, the current instant otherwise.
fn resolve_now(at: Option<&str>, tz: Tz) -> Result<DateTime<Tz>> {
    match at {
        Some(raw) => {
            let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .with_context(|| format!("invalid --at datetime: {raw}"))?;
            localize(naive, tz).with_context(|| format!("--at wall clock does not exist in {tz}"))
        }
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

fn parse_clock(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").with_context(|| format!("invalid wall clock: {raw}"))
}
