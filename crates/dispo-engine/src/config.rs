//! Process-wide engine configuration.
//!
//! The reference timezone and the display constants are fixed at startup
//! and never mutated during a request.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// The single civil timezone all instants are normalized to before any
/// comparison or display.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Paris;

/// Forward horizon, in days, bounding itinerary extraction.
pub const DEFAULT_HORIZON_DAYS: i64 = 15;

/// Maximum displayed length of an upcoming-event title before truncation.
pub const TITLE_MAX_CHARS: usize = 30;

/// Startup configuration for hosts that read the zone and horizon from a
/// document instead of using the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA name of the reference timezone, e.g. "Europe/Paris".
    pub timezone: Tz,
    /// Itinerary horizon in days.
    pub horizon_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: REFERENCE_TZ,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}
