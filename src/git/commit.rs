use crate::models::CommitInfo;

/// `--format` for `git show`: email, name, subject, blank line, body.
pub const SHOW_FORMAT: &str = "--format=%ae%n%an%n%s%n%n%b";

pub fn show_args(revision: &str) -> Vec<String> {
    vec![
        revision.to_string(),
        "--no-patch".to_string(),
        SHOW_FORMAT.to_string(),
    ]
}

/// Parse `git show` output laid out by [`SHOW_FORMAT`].
///
/// Returns `None` for empty output or anything shorter than the three
/// header lines.
pub fn parse_commit(output: &str) -> Option<CommitInfo> {
    let mut lines = output.lines();
    let email = lines.next()?.trim();
    let author = lines.next()?.trim();
    let subject = lines.next()?.trim();

    if email.is_empty() && author.is_empty() && subject.is_empty() {
        return None;
    }

    let body: Vec<&str> = lines.collect();
    let start = body.iter().position(|l| !l.trim().is_empty());
    let end = body.iter().rposition(|l| !l.trim().is_empty());
    let message = match (start, end) {
        (Some(start), Some(end)) => body[start..=end].join("\n"),
        _ => String::new(),
    };

    Some(CommitInfo {
        email: email.to_string(),
        author: author.to_string(),
        subject: subject.to_string(),
        message,
    })
}
