//! Location of the launcher itself.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Absolute directory containing the running launcher binary.
pub fn resolve_app_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("locate launcher executable")?;
    app_dir_of(&exe)
}

/// Absolute, symlink-free parent directory of `exe`.
pub fn app_dir_of(exe: &Path) -> Result<PathBuf> {
    let exe = exe
        .canonicalize()
        .with_context(|| format!("resolve {}", exe.display()))?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable has no parent directory: {}", exe.display()))?
        .to_path_buf();
    debug!(app_dir = %dir.display(), "resolved launcher directory");
    Ok(dir)
}

/// Make `dir` the process working directory.
pub fn enter_app_dir(dir: &Path) -> Result<()> {
    env::set_current_dir(dir).with_context(|| format!("change directory to {}", dir.display()))
}
