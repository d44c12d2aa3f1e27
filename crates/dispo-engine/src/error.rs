//! Error types for feed loading and parsing.

use thiserror::Error;

/// Feed-level failures: the calendar source for a room could not be
/// turned into an interval sequence at all.
///
/// Individual malformed events are not represented here. They are
/// skipped during normalization and the scan continues.
#[derive(Error, Debug)]
pub enum FeedError {
    /// No calendar source exists for this room.
    #[error("calendar source not found: {0}")]
    SourceNotFound(String),

    /// The source exists but could not be read or parsed as a calendar.
    #[error("calendar source unreadable: {0}")]
    SourceUnreadable(String),
}

/// Convenience alias used throughout dispo-engine.
pub type Result<T> = std::result::Result<T, FeedError>;
