use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, Result};

pub const DEFAULT_MARKER: &str = ".git";

/// Existence check used while walking up the directory tree.
pub trait PathProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// Probes the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Root directory of a working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot {
    path: PathBuf,
    marker: String,
}

impl RepoRoot {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The marker directory itself, e.g. `<root>/.git`.
    pub fn git_dir(&self) -> PathBuf {
        self.path.join(&self.marker)
    }

    /// `file` expressed relative to the root, falling back to `file` as given.
    pub fn relative(&self, file: &Path) -> PathBuf {
        let file = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
        match file.strip_prefix(&self.path) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => file,
        }
    }
}

pub struct RepositoryLocator<P = FsProbe> {
    probe: P,
    marker: String,
}

impl RepositoryLocator<FsProbe> {
    pub fn new() -> Self {
        Self::with_probe(FsProbe, DEFAULT_MARKER)
    }
}

impl Default for RepositoryLocator<FsProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PathProbe> RepositoryLocator<P> {
    pub fn with_probe(probe: P, marker: impl Into<String>) -> Self {
        Self {
            probe,
            marker: marker.into(),
        }
    }

    /// Walk from the directory holding `file` towards `/` and return the
    /// first directory that contains the marker.
    ///
    /// Relative paths are anchored at the current directory first; nothing
    /// is canonicalised.
    pub fn find_repo_root(&self, file: &Path) -> Result<RepoRoot> {
        let not_found = || AppError::RepoNotFound(file.display().to_string());
        let absolute = std::path::absolute(file).map_err(|_| not_found())?;

        let start = if self.probe.is_dir(&absolute) {
            Some(absolute.as_path())
        } else {
            absolute.parent()
        };

        for dir in start.into_iter().flat_map(Path::ancestors) {
            if self.probe.exists(&dir.join(&self.marker)) {
                debug!("repository root for {} is {}", file.display(), dir.display());
                return Ok(RepoRoot {
                    path: dir.to_path_buf(),
                    marker: self.marker.clone(),
                });
            }
        }

        Err(not_found())
    }
}
