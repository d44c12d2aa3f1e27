//! Incident-report repository.
//!
//! Process-wide keyed storage for per-room incident reports, modeled as
//! an explicit repository capability injected into callers. The JSON
//! file implementation initializes on first append, keeps reports
//! newest-first per room, and offers no transactional guarantees.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single incident report for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Problem category, e.g. "projector" or "heating".
    pub kind: String,
    #[serde(default)]
    pub description: String,
    /// Who filed it: a logged-in user id, or a public kiosk marker.
    pub author: String,
    pub reported_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("report store unreadable: {0}")]
    Unreadable(String),
    #[error("report store unwritable: {0}")]
    Unwritable(String),
}

/// Repository capability for incident reports.
pub trait ReportStore {
    /// Reports for a room, newest first. A room with no reports yields
    /// an empty list.
    fn get(&self, room_id: &str) -> Result<Vec<Report>, ReportError>;

    /// Record a new report for a room, ahead of the existing ones.
    fn append(&self, room_id: &str, report: Report) -> Result<(), ReportError>;
}

/// JSON-file-backed report store: one document maps each room to its
/// report list.
pub struct JsonReportStore {
    path: PathBuf,
}

impl JsonReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, Vec<Report>>, ReportError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // First access before any report was ever filed.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(err) => return Err(ReportError::Unreadable(err.to_string())),
        };
        serde_json::from_str(&raw).map_err(|err| ReportError::Unreadable(err.to_string()))
    }
}

impl ReportStore for JsonReportStore {
    fn get(&self, room_id: &str) -> Result<Vec<Report>, ReportError> {
        Ok(self.read_all()?.get(room_id).cloned().unwrap_or_default())
    }

    fn append(&self, room_id: &str, report: Report) -> Result<(), ReportError> {
        let mut all = self.read_all()?;
        all.entry(room_id.to_string()).or_default().insert(0, report);
        let raw = serde_json::to_string_pretty(&all)
            .map_err(|err| ReportError::Unwritable(err.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|err| ReportError::Unwritable(err.to_string()))
    }
}
