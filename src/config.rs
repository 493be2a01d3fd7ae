//! Run configuration.
//!
//! Every knob has a built-in default matching the site layout this tool was
//! written for. An optional `sitepub.toml` at the repository root overrides
//! individual fields; the file is not required.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Fixed names and paths the pipeline operates on.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Relative path of the nested content repository.
    pub content_dir: String,
    /// Upstream reference the content repository is synced to.
    pub content_branch: String,
    /// Generator command, run inside the content directory.
    pub generator: String,
    /// File the generator is expected to produce in the content directory.
    pub page_file: String,
    /// Deployment domain marker file at the repository root.
    pub domain_file: String,
    /// Extensions of top-level content files copied as images
    /// (matched case-insensitively).
    pub image_extensions: Vec<String>,
    /// Optional documentation subtree at the repository root.
    pub docs_dir: String,
    /// Directory name skipped anywhere under the documentation subtree.
    pub exclude_dir: String,
    /// Branch the assembled site is published to.
    pub publish_branch: String,
    /// Commit message used when publishing.
    pub commit_message: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "pubdata".to_string(),
            content_branch: "master".to_string(),
            generator: "python3 generator.py".to_string(),
            page_file: "index.html".to_string(),
            domain_file: "CNAME".to_string(),
            image_extensions: vec!["png".to_string()],
            docs_dir: "docstore".to_string(),
            exclude_dir: "nocopy".to_string(),
            publish_branch: "gh-pages".to_string(),
            commit_message: "Deploy updated site".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from `path`, falling back to the defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }
}
