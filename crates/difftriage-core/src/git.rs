//! Git-backed change-set resolution with layered fallback.
//!
//! Resolution is best-effort by contract: the classification core must
//! receive a path list or an empty list, never an error. The layers are
//! attempted in order and each failure is swallowed with a warning:
//!
//! 1. fetch the base's remote ref (failure ignored entirely)
//! 2. `git merge-base <base> <head>` then `git diff --name-only <mb> <head>`
//! 3. direct `git diff --name-only <base> <head>`
//! 4. empty change set

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Result, TriageError};

/// Source of the raw ordered changed-path sequence for a (base, head) pair.
#[async_trait]
pub trait ChangeSetProvider: Send + Sync {
    /// Resolve the ordered list of repository-relative changed paths.
    ///
    /// Never fails: resolution problems degrade to an empty list.
    async fn resolve(&self, base: &str, head: &str) -> Vec<String>;
}

/// Fixed change set, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticChangeSet(pub Vec<String>);

#[async_trait]
impl ChangeSetProvider for StaticChangeSet {
    async fn resolve(&self, _base: &str, _head: &str) -> Vec<String> {
        self.0.clone()
    }
}

/// Resolves change sets by running git in a repository directory.
pub struct GitChangeSetProvider {
    repo_dir: PathBuf,
    timeout: Duration,
}

impl GitChangeSetProvider {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the per-invocation git timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one git invocation and capture trimmed stdout.
    async fn run_git(&self, args: &[&str]) -> Result<String> {
        let child = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TriageError::Git(format!("failed to run git: {e}")))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                TriageError::Git(format!(
                    "git {} timed out after {:?}",
                    args.join(" "),
                    self.timeout
                ))
            })?
            .map_err(|e| TriageError::Git(format!("git {} failed: {e}", args.join(" "))))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TriageError::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Best-effort fetch of the base's remote ref, so a remote-tracking base
    /// like `origin/main` is current. Only attempted for `<remote>/<branch>`
    /// shaped references; any failure is ignored.
    async fn fetch_base(&self, base: &str) {
        let Some((remote, branch)) = base.split_once('/') else {
            return;
        };
        if let Err(err) = self.run_git(&["fetch", remote, branch]).await {
            warn!(event = "changeset.fetch_failed", base = %base, error = %err);
        }
    }

    async fn diff_names(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let stdout = self.run_git(&["diff", "--name-only", from, to]).await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl ChangeSetProvider for GitChangeSetProvider {
    async fn resolve(&self, base: &str, head: &str) -> Vec<String> {
        self.fetch_base(base).await;

        // Preferred: diff against the merge base for a stable comparison.
        match self.run_git(&["merge-base", base, head]).await {
            Ok(merge_base) => match self.diff_names(&merge_base, head).await {
                Ok(paths) => {
                    debug!(
                        event = "changeset.resolved",
                        strategy = "merge_base",
                        files = paths.len()
                    );
                    return paths;
                }
                Err(err) => {
                    warn!(event = "changeset.merge_base_diff_failed", error = %err);
                }
            },
            Err(err) => {
                warn!(event = "changeset.merge_base_failed", base = %base, head = %head, error = %err);
            }
        }

        // Fallback: direct two-ref comparison.
        match self.diff_names(base, head).await {
            Ok(paths) => {
                debug!(
                    event = "changeset.resolved",
                    strategy = "direct",
                    files = paths.len()
                );
                paths
            }
            Err(err) => {
                warn!(event = "changeset.direct_diff_failed", base = %base, head = %head, error = %err);
                Vec::new()
            }
        }
    }
}

/// Check whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    std::process::Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
