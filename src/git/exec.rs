//! Git process adapter.
//!
//! Everything the crate learns about a repository comes from running the
//! `git` binary. `GitExec` is the seam: `CliGit` spawns real processes,
//! tests substitute a scripted fake.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::error::{AppError, Result};

pub trait GitExec: Send + Sync {
    /// Run `git <subcommand> <args..>` inside `work_dir` and return stdout.
    ///
    /// An empty string means the tool had nothing to report.
    fn exec(
        &self,
        subcommand: &str,
        work_dir: &Path,
        args: &[String],
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Shells out to the `git` CLI.
#[derive(Debug, Clone)]
pub struct CliGit {
    binary: PathBuf,
}

impl CliGit {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for CliGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitExec for CliGit {
    async fn exec(&self, subcommand: &str, work_dir: &Path, args: &[String]) -> Result<String> {
        debug!("git {} {} (in {})", subcommand, args.join(" "), work_dir.display());

        let output = tokio::process::Command::new(&self.binary)
            .arg(subcommand)
            .args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AppError::process(subcommand, format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            // `git config --get` exits 1 without a word when the key is unset
            if stderr.is_empty() {
                return Ok(String::new());
            }
            return Err(AppError::process(subcommand, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
