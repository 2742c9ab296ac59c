//! Text shown for a blamed line and for a commit tooltip.
//!
//! Display preferences arrive as a `DisplayConfig` argument and the current
//! time is passed in, so output depends only on the arguments.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::git::is_committed;
use crate::models::{BlameData, BlameLine, CommitInfo, StatusLine};

pub const NOT_COMMITTED: &str = "Not Committed Yet";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format for dates outside the relative window
    pub date_format: String,
    /// Dates newer than this many days are shown as "3 hours ago"
    pub relative_days: i64,
    pub avatar_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            relative_days: 5,
            avatar_size: 80,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(AppError::Config(format!("invalid date_format {:?}", self.date_format)));
        }
        if self.relative_days < 0 || TimeDelta::try_days(self.relative_days).is_none() {
            return Err(AppError::Config(format!(
                "relative_days out of range: {}",
                self.relative_days
            )));
        }
        Ok(())
    }
}

pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}

pub fn format_date(date: &DateTime<FixedOffset>, now: DateTime<Utc>, cfg: &DisplayConfig) -> String {
    // a window too large to represent means every date is treated as old
    let relative_since = TimeDelta::try_days(cfg.relative_days)
        .and_then(|window| now.checked_sub_signed(window));

    match relative_since {
        Some(since) if date.with_timezone(&Utc) >= since => {
            format_relative_time(date.timestamp(), now.timestamp())
        }
        _ => absolute_date(date, &cfg.date_format),
    }
}

fn absolute_date(date: &DateTime<FixedOffset>, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        out.clear();
        out.push_str(&date.format(DEFAULT_DATE_FORMAT).to_string());
    }
    out
}

pub fn status_text(line: &BlameLine, now: DateTime<Utc>, cfg: &DisplayConfig) -> String {
    if is_committed(Some(&line.revision)) {
        format!("{} · {}", line.author, format_date(&line.date, now, cfg))
    } else {
        line.author.clone()
    }
}

/// Status for `row` given the latest blame of the file, if any.
pub fn status_line(
    data: Option<&BlameData>,
    row: usize,
    now: DateTime<Utc>,
    cfg: &DisplayConfig,
) -> StatusLine {
    let Some(data) = data else {
        return StatusLine {
            text: NOT_COMMITTED.to_string(),
            revision: None,
            committed: false,
        };
    };

    match data.get(row) {
        Some(line) => StatusLine {
            text: status_text(line, now, cfg),
            revision: Some(line.revision.clone()),
            committed: is_committed(Some(&line.revision)),
        },
        None => StatusLine {
            text: String::new(),
            revision: None,
            committed: false,
        },
    }
}

/// Gravatar image for `email`.
pub fn avatar_url(email: &str, size: u32) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{}?s={}", hex::encode(digest), size)
}

/// Subject, author line, avatar and message, one block after another.
pub fn tooltip_text(commit: &CommitInfo, avatar: &str) -> String {
    let mut text = format!(
        "{}\n{} <{}>\n{}",
        commit.subject, commit.author, commit.email, avatar
    );
    if !commit.message.is_empty() {
        text.push_str("\n\n");
        text.push_str(&commit.message);
    }
    text
}
