//! Filesystem copy and wipe primitives used by the build and publish phases.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// Delete every top-level entry of `dir` except the names in `keep`.
///
/// Directories are removed recursively, files individually. The keep list is
/// how the publish target's `.git` directory and ignore rules survive the
/// wipe.
pub fn wipe_dir(dir: &Path, keep: &[&str]) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if keep.iter().any(|k| name.as_os_str() == OsStr::new(k)) {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path).with_context(|| format!("remove {}", path.display()))?;
        } else {
            fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        }
    }
    Ok(())
}

/// Copy every top-level entry of `src` into `dst`, skipping names in `skip`.
/// Directories are copied recursively.
pub fn copy_into(src: &Path, dst: &Path, skip: &[&str]) -> Result<()> {
    for entry in fs::read_dir(src).with_context(|| format!("read {}", src.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if skip.iter().any(|s| name.as_os_str() == OsStr::new(s)) {
            continue;
        }
        let target = dst.join(&name);
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            copy_tree_filtered(&path, &target, None)?;
        } else {
            fs::copy(&path, &target)
                .with_context(|| format!("copy {} to {}", path.display(), target.display()))?;
        }
    }
    Ok(())
}

/// Recursively copy the tree rooted at `src` to `dst`.
///
/// When `exclude` is set, any directory with that exact name, at any depth,
/// is skipped along with its contents.
pub fn copy_tree_filtered(src: &Path, dst: &Path, exclude: Option<&str>) -> Result<()> {
    let exclude = exclude.map(str::to_string);
    let mut builder = WalkBuilder::new(src);
    builder.standard_filters(false);
    if let Some(name) = exclude {
        builder.filter_entry(move |entry| entry.file_name() != OsStr::new(&name));
    }

    for entry in builder.build() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.join(rel);
        if entry.file_type().is_some_and(|t| t.is_dir()) {
            fs::create_dir_all(&target)
                .with_context(|| format!("create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copy {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}
