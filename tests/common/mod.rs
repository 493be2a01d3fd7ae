//! Shared git fixtures for integration tests.
//!
//! Builds a miniature deployment universe inside a temp dir: a bare content
//! remote with the generator script, a bare site remote carrying `master`
//! and `gh-pages`, and a working clone of the site wired up with the content
//! submodule and a `sitepub.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Run git with `args` in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run git with `args` in `dir` and return its trimmed stdout.
pub fn git_out(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {:?} failed in {}: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialize a repository on `master` with a test identity configured.
pub fn init_repo(dir: &Path) {
    git(dir, &["init", "-b", "master"]);
    configure_identity(dir);
}

pub fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.name", "test-user"]);
    git(dir, &["config", "user.email", "test@example.com"]);
}

/// Stage everything and commit.
pub fn commit_all(dir: &Path, message: &str) {
    git(dir, &["add", "--all"]);
    git(dir, &["commit", "-m", message]);
}

/// Write `contents` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, contents: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Sorted relative paths of all files under `dir`, excluding `.git`.
pub fn file_set(dir: &Path) -> Vec<String> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            if entry.file_name() == ".git" {
                continue;
            }
            let path = entry.path();
            if entry.file_type().unwrap().is_dir() {
                walk(root, &path, out);
            } else {
                out.push(
                    path.strip_prefix(root)
                        .unwrap()
                        .to_string_lossy()
                        .into_owned(),
                );
            }
        }
    }
    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

/// A complete site-plus-remotes layout for end-to-end runs.
pub struct SiteFixture {
    /// Owns every repository below; dropped last.
    pub tmp: TempDir,
    /// Working clone of the site: where the tool runs.
    pub site: PathBuf,
    /// Bare remote the site pushes to (`master` and `gh-pages`).
    pub site_remote: PathBuf,
    /// Working copy of the content repository, for pushing content updates.
    pub content_src: PathBuf,
}

impl SiteFixture {
    /// Build the fixture with the given generator shell script (run via
    /// `sh gen.sh` from inside the content directory).
    pub fn new(generator_script: &str) -> Self {
        let tmp = TempDir::new().unwrap();

        // Content repository with the generator and some top-level files.
        let content_src = tmp.path().join("content-src");
        fs::create_dir(&content_src).unwrap();
        init_repo(&content_src);
        write_file(&content_src, "gen.sh", generator_script);
        write_file(&content_src, "logo.png", "png bytes");
        write_file(&content_src, "banner.PNG", "png bytes");
        write_file(&content_src, "photo.jpg", "jpg bytes");
        commit_all(&content_src, "content v1");

        let content_remote = tmp.path().join("content.git");
        git(
            tmp.path(),
            &["clone", "--bare", "content-src", "content.git"],
        );
        git(
            &content_src,
            &["remote", "add", "origin", content_remote.to_str().unwrap()],
        );

        // Site repository: domain marker, docs subtree, config, submodule.
        let site = tmp.path().join("site");
        fs::create_dir(&site).unwrap();
        init_repo(&site);
        git(&site, &["config", "protocol.file.allow", "always"]);
        write_file(&site, "CNAME", "example.org\n");
        write_file(&site, "docstore/a.md", "published doc\n");
        write_file(&site, "docstore/nocopy/secret.md", "never published\n");
        write_file(&site, "sitepub.toml", "generator = \"sh gen.sh\"\n");
        git(
            &site,
            &[
                "-c",
                "protocol.file.allow=always",
                "submodule",
                "add",
                content_remote.to_str().unwrap(),
                "pubdata",
            ],
        );
        commit_all(&site, "site skeleton");

        let site_remote = tmp.path().join("site.git");
        git(tmp.path(), &["clone", "--bare", "site", "site.git"]);
        git(
            &site,
            &["remote", "add", "origin", site_remote.to_str().unwrap()],
        );
        // The publish branch starts as a copy of master; the first deploy
        // replaces its content entirely.
        git(&site, &["push", "origin", "master:gh-pages"]);
        git(&site, &["fetch", "origin"]);

        SiteFixture {
            tmp,
            site,
            site_remote,
            content_src,
        }
    }

    /// Commit SHA of `branch` on the site remote.
    pub fn remote_sha(&self, branch: &str) -> String {
        git_out(&self.site_remote, &["rev-parse", branch])
    }

    /// Fresh checkout of the remote publish branch for inspection.
    pub fn checkout_published(&self, name: &str) -> PathBuf {
        let dest = self.tmp.path().join(name);
        git(
            self.tmp.path(),
            &[
                "clone",
                "--branch",
                "gh-pages",
                self.site_remote.to_str().unwrap(),
                name,
            ],
        );
        dest
    }
}
