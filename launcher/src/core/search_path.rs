//! Idempotent extension of the command-search path.

use std::ffi::{OsStr, OsString};

/// Platform separator between search-path entries.
pub const SEPARATOR: &str = if cfg!(windows) { ";" } else { ":" };

/// Name of the search-path variable as it is spelled on this platform.
pub const PATH_KEY: &str = "PATH";

/// Result of ensuring the runtime directory is on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPathUpdate {
    /// The runtime directory was already present; nothing changes.
    Unchanged,
    /// New value for the search-path variable.
    Prepended(OsString),
}

impl SearchPathUpdate {
    pub fn is_prepended(&self) -> bool {
        matches!(self, Self::Prepended(_))
    }
}

/// Prepend `runtime_dir` to `current` unless it already occurs in it.
///
/// Presence is a plain substring test, so `C:\Program Files\nodejs\` in the
/// path counts as present. An unset or empty path becomes just `runtime_dir`.
pub fn extend_search_path(current: Option<&OsStr>, runtime_dir: &str) -> SearchPathUpdate {
    let current = current.unwrap_or_default();
    if current.to_string_lossy().contains(runtime_dir) {
        return SearchPathUpdate::Unchanged;
    }

    let mut updated = OsString::from(runtime_dir);
    if !current.is_empty() {
        updated.push(SEPARATOR);
        updated.push(current);
    }
    SearchPathUpdate::Prepended(updated)
}

/// Whether an environment key names the search-path variable.
///
/// Windows environment keys are case-insensitive (`Path` is common there).
pub fn is_path_key(key: &OsStr) -> bool {
    if cfg!(windows) {
        key.to_string_lossy().eq_ignore_ascii_case(PATH_KEY)
    } else {
        key == PATH_KEY
    }
}
