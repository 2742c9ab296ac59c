//! Latest blame per file, guarded against out-of-order completions.
//!
//! Each fetch takes a `Ticket` before calling git. When fetches for the same
//! file overlap, only a result whose ticket is newer than the one already
//! applied replaces the stored blame.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::models::BlameData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    path: PathBuf,
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

struct Applied {
    seq: u64,
    data: Option<Arc<BlameData>>,
}

#[derive(Default)]
pub struct BlameTracker {
    next: AtomicU64,
    files: RwLock<HashMap<PathBuf, Applied>>,
}

impl BlameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, path: &Path) -> Ticket {
        Ticket {
            path: path.to_path_buf(),
            seq: self.next.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Store `data` unless a newer fetch for the same file already landed.
    pub fn apply(&self, ticket: Ticket, data: Option<BlameData>) -> bool {
        let mut files = self.files.write();
        if let Some(applied) = files.get(&ticket.path) {
            if applied.seq >= ticket.seq {
                debug!(
                    "dropping stale blame for {} (#{} < #{})",
                    ticket.path.display(),
                    ticket.seq,
                    applied.seq
                );
                return false;
            }
        }
        files.insert(
            ticket.path,
            Applied {
                seq: ticket.seq,
                data: data.map(Arc::new),
            },
        );
        true
    }

    /// Latest applied blame. Outer `None`: never fetched; inner `None`: no data.
    pub fn current(&self, path: &Path) -> Option<Option<Arc<BlameData>>> {
        self.files.read().get(path).map(|applied| applied.data.clone())
    }

    /// Drop everything stored for `path`, e.g. once its editor is closed.
    pub fn forget(&self, path: &Path) {
        self.files.write().remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlameLine;
    use chrono::DateTime;

    fn data(author: &str) -> BlameData {
        BlameData {
            lines: vec![BlameLine {
                revision: "abc".to_string(),
                author: author.to_string(),
                date: DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap(),
            }],
        }
    }

    #[test]
    fn newer_result_wins_even_if_it_lands_first() {
        let tracker = BlameTracker::new();
        let path = Path::new("/repo/a.rs");

        let older = tracker.begin(path);
        let newer = tracker.begin(path);
        assert!(newer.seq() > older.seq());

        assert!(tracker.apply(newer, Some(data("new"))));
        assert!(!tracker.apply(older, Some(data("old"))));

        let current = tracker.current(path).unwrap().unwrap();
        assert_eq!(current.lines[0].author, "new");
    }

    #[test]
    fn files_are_tracked_independently() {
        let tracker = BlameTracker::new();
        let a = tracker.begin(Path::new("/a"));
        let b = tracker.begin(Path::new("/b"));

        assert!(tracker.apply(b, None));
        assert!(tracker.apply(a, Some(data("x"))));

        assert!(tracker.current(Path::new("/b")).unwrap().is_none());
        assert!(tracker.current(Path::new("/a")).unwrap().is_some());
        assert!(tracker.current(Path::new("/c")).is_none());
    }

    #[test]
    fn forget_clears_state() {
        let tracker = BlameTracker::new();
        let path = Path::new("/a");
        let t = tracker.begin(path);
        tracker.apply(t, None);
        tracker.forget(path);
        assert!(tracker.current(path).is_none());
    }
}
