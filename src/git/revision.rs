/// Prefix git blame puts on lines whose history stops at a boundary commit.
pub const BOUNDARY_MARKER: char = '^';

/// Drop a leading boundary marker so the revision can be passed back to git.
pub fn strip_boundary(revision: &str) -> &str {
    revision.strip_prefix(BOUNDARY_MARKER).unwrap_or(revision)
}

/// Whether `revision` names a real commit.
///
/// Absent revisions and git's all-zero "not committed yet" id are not,
/// with or without the boundary marker.
pub fn is_committed(revision: Option<&str>) -> bool {
    match revision.map(strip_boundary) {
        None => false,
        Some(rev) => !rev.is_empty() && !rev.bytes().all(|b| b == b'0'),
    }
}
