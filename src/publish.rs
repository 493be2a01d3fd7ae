//! Publish phase: replace the live site with the staged build.

use std::path::Path;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use tracing::info;

use crate::config::SiteConfig;
use crate::error::SitepubError;
use crate::{cmd, fsutil, git};

/// Entries never removed from a publish target during the wipe.
const KEEP: &[&str] = &[".git", ".gitignore"];

/// Name of the publish-branch clone created inside the staging area by the
/// fresh-clone strategy.
const CLONE_DIR: &str = "publish-clone";

/// How the publish target is obtained and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Clone the publish branch into the staging area and push from there.
    /// Never touches the operator's working tree or local branch state.
    FreshClone,
    /// Check out the publish branch in the working tree, publish, then
    /// restore the original branch and any stashed changes.
    InPlace,
}

/// Publish the staged site to the configured branch.
pub fn publish_site(
    root: &Path,
    config: &SiteConfig,
    staging: &Path,
    strategy: Strategy,
) -> Result<()> {
    match strategy {
        Strategy::FreshClone => publish_fresh_clone(root, config, staging),
        Strategy::InPlace => publish_in_place(root, config, staging),
    }
}

fn publish_fresh_clone(root: &Path, config: &SiteConfig, staging: &Path) -> Result<()> {
    info!("cloning {} into a fresh working tree", config.publish_branch);
    let remote = git::origin_url(root)?;
    let clone = staging.join(CLONE_DIR);
    let clone_arg = clone
        .to_str()
        .ok_or_else(|| anyhow!("staging path {} is not valid UTF-8", clone.display()))?;
    cmd::run_in(
        "git",
        &[
            "clone",
            "--branch",
            &config.publish_branch,
            "--single-branch",
            &remote,
            clone_arg,
        ],
        Some(root),
    )?;

    // The clone must match the remote exactly before the wipe so that a
    // stale local state can never be pushed back.
    cmd::run_in(
        "git",
        &["fetch", "origin", &config.publish_branch],
        Some(&clone),
    )?;
    let remote_ref = format!("origin/{}", config.publish_branch);
    cmd::run_in("git", &["reset", "--hard", &remote_ref], Some(&clone))?;

    info!("clearing old site files");
    fsutil::wipe_dir(&clone, KEEP)?;

    info!("copying staged site into {}", config.publish_branch);
    fsutil::copy_into(staging, &clone, &[CLONE_DIR])?;

    commit_and_push(&clone, config)
}

fn publish_in_place(root: &Path, config: &SiteConfig, staging: &Path) -> Result<()> {
    let checkpoint = checkout_publish_branch(root, config)?;
    wipe_checked(root, &config.publish_branch)?;

    info!("copying staged site into {}", config.publish_branch);
    fsutil::copy_into(staging, root, &[])?;

    commit_and_push(root, config)?;
    checkpoint.restore(root)
}

/// Branch and stash state recorded before switching to the publish branch,
/// consumed by the restore step once publishing is done.
#[derive(Debug)]
pub struct Checkpoint {
    original_branch: String,
    stashed: bool,
}

fn checkout_publish_branch(root: &Path, config: &SiteConfig) -> Result<Checkpoint> {
    let original_branch = git::current_branch(root)?;
    let stashed = git::has_changes(root)?;
    if stashed {
        info!("stashing uncommitted changes");
        cmd::run_in("git", &["stash", "push", "--include-untracked"], Some(root))?;
    }
    cmd::run_in("git", &["checkout", &config.publish_branch], Some(root))?;
    Ok(Checkpoint {
        original_branch,
        stashed,
    })
}

impl Checkpoint {
    fn restore(self, root: &Path) -> Result<()> {
        info!("restoring branch {}", self.original_branch);
        cmd::run_in("git", &["checkout", &self.original_branch], Some(root))?;
        if self.stashed {
            cmd::run_in("git", &["stash", "pop"], Some(root))?;
        }
        Ok(())
    }
}

/// Wipe the publish target's content, refusing unless `branch` is checked
/// out in `target`.
///
/// The branch check must fire before any deletion: wiping the wrong checkout
/// would destroy source-tree content.
pub fn wipe_checked(target: &Path, branch: &str) -> Result<()> {
    let actual = git::current_branch(target)?;
    if actual != branch {
        return Err(SitepubError::WrongBranch {
            expected: branch.to_string(),
            actual,
        }
        .into());
    }
    info!("clearing old site files");
    fsutil::wipe_dir(target, KEEP)
}

fn commit_and_push(target: &Path, config: &SiteConfig) -> Result<()> {
    cmd::run_in("git", &["add", "--all"], Some(target))?;
    if !git::has_changes(target)? {
        // Benign no-op: the remote already matches the staged site, so the
        // commit and the push are both skipped.
        info!("nothing to commit; site already up to date");
        return Ok(());
    }
    cmd::run_in(
        "git",
        &["commit", "-m", &config.commit_message],
        Some(target),
    )?;
    info!("pushing {}", config.publish_branch);
    cmd::run_in(
        "git",
        &["push", "origin", &config.publish_branch],
        Some(target),
    )?;
    Ok(())
}
