//! Shallow checkout of a remote repository for scanning

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context};
use tempfile::TempDir;
use tracing::info;

/// A cloned repository in a temporary directory.
///
/// The tree is removed when the checkout is dropped.
pub struct Checkout {
    dir: TempDir,
}

impl Checkout {
    /// Root of the working tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Clone `url` with `git clone --depth 1` into a fresh temporary directory.
pub fn clone_shallow(url: &str) -> anyhow::Result<Checkout> {
    let url = url.trim();
    if url.is_empty() {
        bail!("repository URL is empty");
    }

    let dir = TempDir::new().context("could not create a temporary directory")?;
    info!("cloning {url} into {}", dir.path().display());

    let output = Command::new("git")
        // no hooks from the user's template directory
        .env("GIT_TEMPLATE_DIR", "")
        .args(["clone", "--depth", "1", "--quiet"])
        .arg(url)
        .arg(dir.path())
        .output()
        .context("could not run git")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("could not clone {url}: {}", stderr.trim());
    }

    Ok(Checkout { dir })
}
