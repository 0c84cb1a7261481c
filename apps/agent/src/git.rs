//! Locates the repository's git dir.
//!
//! Downloads are staged under `<git dir>/lfs/tmp` so git-lfs can rename
//! them into its object cache without crossing volumes.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, bail};

/// Resolves the git dir of the repository in the current directory.
pub fn git_dir() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    git_dir_in(&cwd)
}

/// Runs `git rev-parse --git-dir` in `dir` and returns the absolute,
/// symlink-resolved result.
pub fn git_dir_in(dir: &Path) -> anyhow::Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(dir)
        .output()
        .context("failed to call git rev-parse --git-dir")?;

    if !output.status.success() {
        bail!(
            "git rev-parse --git-dir failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    abs_path(dir, Path::new(&path))
}

/// Makes `path` absolute against `base` and resolves symlinks.
fn abs_path(base: &Path, path: &Path) -> anyhow::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        bail!("empty path");
    }
    let joined = base.join(path);
    std::fs::canonicalize(&joined).with_context(|| format!("failed to resolve {}", joined.display()))
}
