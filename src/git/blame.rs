//! Parsing of `git blame -c` output.
//!
//! The annotate-compatible mode emits one tab-separated record per line:
//!
//! ```text
//! <rev>\t(<author>\t<date>\t<lineno>)<content>
//! ```
//!
//! Dates are requested with `--date=iso`, i.e. `2020-01-31 12:00:00 +0100`.

use chrono::DateTime;

use crate::models::{BlameData, BlameLine};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Arguments for `git blame` on `relative_path`.
pub fn blame_args(relative_path: &str) -> Vec<String> {
    vec![
        "-c".to_string(),
        "-l".to_string(),
        "--date=iso".to_string(),
        "--".to_string(),
        relative_path.to_string(),
    ]
}

/// Parse the whole output. `None` when there is nothing usable.
pub fn parse_blame(output: &str) -> Option<BlameData> {
    let lines = output
        .lines()
        .filter(|l| !l.is_empty())
        .map(parse_record)
        .collect::<Option<Vec<_>>>()?;

    if lines.is_empty() {
        return None;
    }

    Some(BlameData { lines })
}

fn parse_record(record: &str) -> Option<BlameLine> {
    let mut fields = record.splitn(4, '\t');
    let rev_field = fields.next()?;
    let author_field = fields.next()?;
    let date_field = fields.next()?;
    let rest = fields.next()?;

    // extra detail (e.g. the original filename) may follow the revision
    let revision = rev_field.split_whitespace().next()?.to_string();
    let author = author_field.strip_prefix('(')?.trim().to_string();
    let date = DateTime::parse_from_str(date_field.trim(), DATE_FORMAT).ok()?;

    let (line_no, _content) = rest.split_once(')')?;
    if line_no.trim().parse::<u32>().is_err() {
        return None;
    }

    Some(BlameLine {
        revision,
        author,
        date,
    })
}
