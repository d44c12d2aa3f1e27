//! Room location heuristic and manual room metadata.
//!
//! Infers a floor and wing from a room identifier, overridable by the
//! per-room metadata document. Used for filtering and display only;
//! availability logic never depends on it.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Wing of the building a room sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wing {
    Left,
    Right,
    Center,
}

impl fmt::Display for Wing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Wing::Left => "left",
            Wing::Right => "right",
            Wing::Center => "center",
        };
        f.write_str(label)
    }
}

/// Manual per-room metadata, with explicit fields and defaults for
/// everything the document leaves out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomMeta {
    pub floor: Option<u8>,
    pub wing: Option<Wing>,
    pub capacity: Option<u32>,
    pub has_pc: bool,
    pub has_projector: bool,
    pub description: String,
}

/// Map of room identifier to manual metadata.
pub type RoomDirectory = HashMap<String, RoomMeta>;

/// Infer the floor and wing for a room. Total: always returns a value.
///
/// Floor: the manual override, else the identifier's leading digit, else
/// 0. Wing: the manual override, else the parity of the first digit run
/// in the identifier (even right, odd left), else center.
pub fn locate(room_id: &str, meta: &RoomMeta) -> (u8, Wing) {
    let floor = meta.floor.unwrap_or_else(|| {
        room_id
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .map_or(0, |digit| digit as u8)
    });

    let wing = meta.wing.unwrap_or_else(|| match first_digit_run(room_id) {
        Some(run) => {
            // Parity of the run equals the parity of its last digit.
            let last = run.chars().next_back().and_then(|c| c.to_digit(10)).unwrap_or(0);
            if last % 2 == 0 {
                Wing::Right
            } else {
                Wing::Left
            }
        }
        None => Wing::Center,
    });

    (floor, wing)
}

/// First contiguous run of ASCII digits in the identifier.
fn first_digit_run(room_id: &str) -> Option<&str> {
    let start = room_id.find(|c: char| c.is_ascii_digit())?;
    let run = &room_id[start..];
    let len = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    Some(&run[..len])
}

/// Load the room metadata directory from a JSON document.
///
/// A missing or unreadable document degrades to an empty directory;
/// rooms absent from the directory resolve to [`RoomMeta::default`].
pub fn load_directory(path: &Path) -> RoomDirectory {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                log::warn!("room directory {}: {err}", path.display());
            }
            return RoomDirectory::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(directory) => directory,
        Err(err) => {
            log::warn!("room directory {} is not valid JSON: {err}", path.display());
            RoomDirectory::new()
        }
    }
}
