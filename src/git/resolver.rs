//! Blame, commit and link lookups for a single file.
//!
//! Every call locates the repository root afresh and runs git inside it.
//! Nothing is cached here; `BlameTracker` keeps the latest blame per file.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::git::blame::{blame_args, parse_blame};
use crate::git::commit::{parse_commit, show_args};
use crate::git::exec::{CliGit, GitExec};
use crate::git::locator::{FsProbe, PathProbe, RepoRoot, RepositoryLocator};
use crate::git::remote::{LinkTable, RemoteDescriptor};
use crate::git::revision::{is_committed, strip_boundary};
use crate::models::{BlameData, CommitInfo};

pub const REMOTE_URL_KEY: &str = "remote.origin.url";

pub struct LinkResolver<E = CliGit, P = FsProbe> {
    git: E,
    locator: RepositoryLocator<P>,
    links: LinkTable,
}

impl<E: GitExec, P: PathProbe> LinkResolver<E, P> {
    pub fn new(git: E, locator: RepositoryLocator<P>, links: LinkTable) -> Self {
        Self { git, locator, links }
    }

    pub fn find_repo_root(&self, file: &Path) -> Result<RepoRoot> {
        self.locator.find_repo_root(file)
    }

    pub fn is_committed(&self, revision: Option<&str>) -> bool {
        is_committed(revision)
    }

    /// Per-line blame for `file`, or `None` when git has nothing to say.
    ///
    /// Untracked files, files outside a repository and git failures all
    /// land here as `None`.
    pub async fn get_blame_data(&self, file: &Path) -> Option<BlameData> {
        let root = match self.locator.find_repo_root(file) {
            Ok(root) => root,
            Err(e) => {
                debug!("no blame for {}: {}", file.display(), e);
                return None;
            }
        };

        let relative = root.relative(file).to_string_lossy().to_string();
        let output = match self.git.exec("blame", root.path(), &blame_args(&relative)).await {
            Ok(output) => output,
            Err(e) => {
                debug!("no blame for {}: {}", file.display(), e);
                return None;
            }
        };

        let data = parse_blame(&output);
        if data.is_none() && !output.trim().is_empty() {
            warn!("unexpected blame output for {}", file.display());
        }
        data
    }

    /// Author and message of `revision`, or `None` if git printed nothing.
    pub async fn get_commit(&self, file: &Path, revision: &str) -> Result<Option<CommitInfo>> {
        if !is_committed(Some(revision)) {
            return Ok(None);
        }
        let root = self.locator.find_repo_root(file)?;
        let revision = strip_boundary(revision);

        let output = self.git.exec("show", root.path(), &show_args(revision)).await?;
        Ok(parse_commit(&output))
    }

    /// Web page for `revision` on the host of `remote.origin.url`.
    pub async fn get_commit_link(&self, file: &Path, revision: &str) -> Result<Option<String>> {
        if !is_committed(Some(revision)) {
            return Ok(None);
        }
        let root = self.locator.find_repo_root(file)?;
        let revision = strip_boundary(revision);

        let args = vec!["--get".to_string(), REMOTE_URL_KEY.to_string()];
        let url = self.git.exec("config", root.path(), &args).await?;
        let url = url.trim();
        if url.is_empty() {
            debug!("no remote configured in {}", root.path().display());
            return Ok(None);
        }

        let Some(remote) = RemoteDescriptor::parse(url) else {
            debug!("cannot derive a web link from remote {}", url);
            return Ok(None);
        };

        Ok(Some(self.links.commit_link(&remote, revision)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::git::exec::fake::ScriptedGit;
    use std::path::PathBuf;

    /// Every directory counts as a repository root.
    struct AnyRoot;

    impl PathProbe for AnyRoot {
        fn exists(&self, _path: &Path) -> bool {
            true
        }

        fn is_dir(&self, _path: &Path) -> bool {
            false
        }
    }

    /// No directory is a repository root.
    struct NoRoot;

    impl PathProbe for NoRoot {
        fn exists(&self, _path: &Path) -> bool {
            false
        }

        fn is_dir(&self, _path: &Path) -> bool {
            false
        }
    }

    fn resolver(git: ScriptedGit) -> LinkResolver<ScriptedGit, AnyRoot> {
        LinkResolver::new(
            git,
            RepositoryLocator::with_probe(AnyRoot, ".git"),
            LinkTable::default(),
        )
    }

    const FILE: &str = "/repo/somefile.txt";

    #[tokio::test]
    async fn github_link() {
        let git = ScriptedGit::new().ok(
            "config",
            Some("--get"),
            "https://github.com/baldurh/atom-status-bar-blame.git\n",
        );
        let link = resolver(git).get_commit_link(Path::new(FILE), "12345678").await.unwrap();
        assert_eq!(
            link.as_deref(),
            Some("https://github.com/baldurh/atom-status-bar-blame/commit/12345678")
        );
    }

    #[tokio::test]
    async fn generic_link() {
        let git = ScriptedGit::new().ok("config", None, "git@gitlab.hidden.dom:eid/broncode.git");
        let link = resolver(git).get_commit_link(Path::new(FILE), "12345678").await.unwrap();
        assert_eq!(link.as_deref(), Some("http://gitlab.hidden.dom/eid/broncode/commit/12345678"));
    }

    #[tokio::test]
    async fn link_strips_boundary_marker() {
        let git = ScriptedGit::new().ok("config", None, "https://github.com/acme/widgets.git");
        let link = resolver(git).get_commit_link(Path::new(FILE), "^abc123").await.unwrap();
        assert_eq!(link.as_deref(), Some("https://github.com/acme/widgets/commit/abc123"));
    }

    #[tokio::test]
    async fn no_remote_means_no_link() {
        let link = resolver(ScriptedGit::new())
            .get_commit_link(Path::new(FILE), "abc123")
            .await
            .unwrap();
        assert!(link.is_none());
    }

    #[tokio::test]
    async fn uncommitted_revision_skips_git() {
        let r = resolver(ScriptedGit::new().ok("config", None, "https://github.com/a/b.git"));
        assert!(r.get_commit_link(Path::new(FILE), "00000000").await.unwrap().is_none());
        assert!(r.get_commit(Path::new(FILE), "^00000000").await.unwrap().is_none());
        assert_eq!(r.git.call_count(), 0);
    }

    #[tokio::test]
    async fn commit_metadata() {
        let git = ScriptedGit::new().ok(
            "show",
            Some("12345678"),
            "someone@wherever.com\nSome One\nSubject Line\n\nLine 1\nLine 2",
        );
        let r = resolver(git);

        let commit = r.get_commit(Path::new(FILE), "12345678").await.unwrap().unwrap();
        assert_eq!(commit.email, "someone@wherever.com");
        assert_eq!(commit.author, "Some One");
        assert_eq!(commit.subject, "Subject Line");
        assert_eq!(commit.message, "Line 1\nLine 2");

        assert!(r.get_commit(Path::new(FILE), "11111111").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn commit_runs_in_repo_root() {
        let git = ScriptedGit::new().ok("show", None, "a@b.com\nName\nSubject\n");
        let r = resolver(git);
        r.get_commit(Path::new(FILE), "^abc").await.unwrap();

        let calls = r.git.calls.lock();
        let (sub, dir, args) = &calls[0];
        assert_eq!(sub, "show");
        assert_eq!(dir, &PathBuf::from("/repo"));
        assert_eq!(args[0], "abc");
    }

    #[tokio::test]
    async fn commit_process_error_propagates() {
        let git = ScriptedGit::new().fail("show", "fatal: bad object deadbeef");
        let err = resolver(git)
            .get_commit(Path::new(FILE), "deadbeef")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Process { .. }));
    }

    #[tokio::test]
    async fn blame_data() {
        let git = ScriptedGit::new().ok(
            "blame",
            None,
            "abc123 old.txt\t(Some One\t2020-01-31 12:00:00 +0100\t1)first\n\
             0000000000000000000000000000000000000000\t(Not Committed Yet\t2024-03-02 10:00:00 +0000\t2)second\n",
        );
        let r = resolver(git);
        let data = r.get_blame_data(Path::new(FILE)).await.unwrap();
        assert_eq!(data.lines.len(), 2);
        assert_eq!(data.get(0).unwrap().revision, "abc123");
        assert!(!r.is_committed(Some(&data.get(1).unwrap().revision)));

        let calls = r.git.calls.lock();
        assert_eq!(calls[0].2.last().map(String::as_str), Some("somefile.txt"));
    }

    #[tokio::test]
    async fn blame_degrades_to_none() {
        assert!(resolver(ScriptedGit::new()).get_blame_data(Path::new(FILE)).await.is_none());

        let failing = ScriptedGit::new().fail("blame", "fatal: no such path 'somefile.txt' in HEAD");
        assert!(resolver(failing).get_blame_data(Path::new(FILE)).await.is_none());

        let outside = LinkResolver::new(
            ScriptedGit::new(),
            RepositoryLocator::with_probe(NoRoot, ".git"),
            LinkTable::default(),
        );
        assert!(outside.get_blame_data(Path::new(FILE)).await.is_none());
    }

    #[tokio::test]
    async fn commit_outside_repository_is_not_found() {
        let outside = LinkResolver::new(
            ScriptedGit::new(),
            RepositoryLocator::with_probe(NoRoot, ".git"),
            LinkTable::default(),
        );
        let err = outside.get_commit(Path::new(FILE), "abc").await.unwrap_err();
        assert!(matches!(err, AppError::RepoNotFound(_)));
    }
}
