//! # dispo-engine
//!
//! Room availability engine: turns a room's iCalendar feed into a
//! timezone-normalized interval model and answers three questions about
//! it -- is the room occupied right now, what does its agenda look like
//! over a bounded horizon, and is a requested time window free.
//!
//! Every operation is stateless. The feed is re-read and re-parsed per
//! call, and all instants are normalized to the single reference
//! timezone before any comparison or display. A corrupt or missing feed
//! degrades per component (explicit error state, conservative
//! unavailable, empty itinerary) instead of faulting the caller.
//!
//! ## Modules
//!
//! - [`feed`] — ICS source → raw events → normalized intervals
//! - [`normalize`] — marker normalization into the reference timezone
//! - [`status`] — point-in-time occupancy resolution
//! - [`itinerary`] — bounded-horizon agenda extraction
//! - [`availability`] — interval-overlap window checks
//! - [`locate`] — floor/wing heuristic and manual room metadata
//! - [`reports`] — incident-report repository
//! - [`config`] — reference timezone and display constants
//! - [`error`] — feed-level error types

pub mod availability;
pub mod config;
pub mod error;
pub mod feed;
pub mod itinerary;
pub mod locate;
pub mod normalize;
pub mod reports;
pub mod status;

pub use availability::{availability_of_source, clock_window, duration_window, is_available};
pub use config::{EngineConfig, DEFAULT_HORIZON_DAYS, REFERENCE_TZ, TITLE_MAX_CHARS};
pub use error::FeedError;
pub use feed::{load_schedule, parse_schedule, RawEvent};
pub use itinerary::{extract_itinerary, itinerary_of_source, ItineraryEntry};
pub use locate::{locate, load_directory, RoomDirectory, RoomMeta, Wing};
pub use normalize::{localize, NormalizedInterval};
pub use reports::{JsonReportStore, Report, ReportError, ReportStore};
pub use status::{resolve_status, status_of_source, RoomState, RoomStatus};
