//! Blame data transfer objects.
//!
//! Per-line author attribution for the working copy of a file, as reported
//! by `git blame`. Rebuilt from scratch on every fetch.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Blame information for a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlameLine {
    /// Revision that last touched the line, possibly `^`-prefixed
    pub revision: String,
    /// Name of the author who last modified this line
    pub author: String,
    /// When the line was last modified
    pub date: DateTime<FixedOffset>,
}

/// Blame for a whole file, indexed by zero-based row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlameData {
    pub lines: Vec<BlameLine>,
}

impl BlameData {
    pub fn get(&self, row: usize) -> Option<&BlameLine> {
        self.lines.get(row)
    }
}

/// Response for a blame request on a file.
#[derive(Debug, Serialize)]
pub struct BlameResponse {
    /// Path of the file
    pub path: String,
    /// False when git had no blame for the file (untracked, new, or error)
    pub committed: bool,
    /// Per-line blame information
    pub lines: Vec<BlameLine>,
}

/// What the status bar shows for one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub text: String,
    pub revision: Option<String>,
    pub committed: bool,
}
