//! Content sync phase.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cmd;
use crate::config::SiteConfig;

/// Bring the nested content repository up to date with its upstream branch.
///
/// Any failing step aborts the run; there is no retry or partial-sync
/// recovery.
pub fn sync_content(root: &Path, config: &SiteConfig) -> Result<()> {
    info!("updating {} submodule", config.content_dir);
    cmd::run_in(
        "git",
        &["submodule", "update", "--init", "--recursive"],
        Some(root),
    )?;

    let content = root.join(&config.content_dir);
    cmd::run_in(
        "git",
        &["fetch", "origin", &config.content_branch],
        Some(&content),
    )?;
    cmd::run_in("git", &["checkout", &config.content_branch], Some(&content))?;
    cmd::run_in("git", &["pull"], Some(&content))?;
    Ok(())
}
