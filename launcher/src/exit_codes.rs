//! Stable exit codes for the launcher binary.

/// Launch step was reached. Covers a clean child exit, a non-zero child exit,
/// a user interrupt, and a reported launch error alike.
pub const OK: i32 = 0;
/// Setup failed before launching: own directory unresolved, working directory
/// not changeable, or an invalid `launcher.toml`.
pub const SETUP_FAILED: i32 = 1;
