//! Thin git query helpers over the command runner.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cmd;

/// Absolute path of the repository work tree containing `dir`.
pub fn toplevel(dir: &Path) -> Result<PathBuf> {
    let out = cmd::run_in("git", &["rev-parse", "--show-toplevel"], Some(dir))?;
    Ok(PathBuf::from(out))
}

/// Name of the branch currently checked out in `repo`.
pub fn current_branch(repo: &Path) -> Result<String> {
    cmd::run_in("git", &["rev-parse", "--abbrev-ref", "HEAD"], Some(repo))
}

/// URL of the `origin` remote of `repo`.
pub fn origin_url(repo: &Path) -> Result<String> {
    cmd::run_in("git", &["config", "--get", "remote.origin.url"], Some(repo))
}

/// Whether `repo` has any uncommitted changes, staged or not, including
/// untracked files.
pub fn has_changes(repo: &Path) -> Result<bool> {
    let out = cmd::run_in("git", &["status", "--porcelain"], Some(repo))?;
    Ok(!out.is_empty())
}
