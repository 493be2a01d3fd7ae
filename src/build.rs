//! Site build phase: run the generator and assemble the staging area.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::config::SiteConfig;
use crate::{cmd, fsutil};

/// Run the generator and stage everything to be published into `staging`.
///
/// On success the staging area is a complete, self-contained snapshot of the
/// site: the generated page, the domain marker, every top-level image from
/// the content directory, and the documentation subtree with the exclusion
/// folder filtered out. Publish must never run against a partially populated
/// staging area, so every copy here is fatal on failure.
pub fn build_site(root: &Path, config: &SiteConfig, staging: &Path) -> Result<()> {
    let content = root.join(&config.content_dir);

    info!("generating site");
    let argv = shell_words::split(&config.generator)
        .with_context(|| format!("parse generator command `{}`", config.generator))?;
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("generator command is empty"))?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    cmd::run_in(program, &args, Some(&content))?;

    info!("staging site artifacts");
    fs::create_dir_all(staging)
        .with_context(|| format!("create staging dir {}", staging.display()))?;

    let page = content.join(&config.page_file);
    fs::copy(&page, staging.join(&config.page_file))
        .with_context(|| format!("copy generated page {}", page.display()))?;

    let domain = root.join(&config.domain_file);
    fs::copy(&domain, staging.join(&config.domain_file))
        .with_context(|| format!("copy domain marker {}", domain.display()))?;

    for entry in
        fs::read_dir(&content).with_context(|| format!("read {}", content.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if is_image(&name.to_string_lossy(), &config.image_extensions) {
            fs::copy(entry.path(), staging.join(&name))
                .with_context(|| format!("copy image {}", entry.path().display()))?;
        }
    }

    // The documentation subtree is optional; its absence is not an error.
    let docs = root.join(&config.docs_dir);
    if docs.is_dir() {
        fsutil::copy_tree_filtered(
            &docs,
            &staging.join(&config.docs_dir),
            Some(&config.exclude_dir),
        )?;
    }

    Ok(())
}

/// Whether `name` has one of the configured image extensions, ignoring case.
fn is_image(name: &str, extensions: &[String]) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty() && extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
}
