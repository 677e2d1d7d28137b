//! I/O helpers for the launcher.

pub mod app_dir;
pub mod config;
pub mod process;
pub mod spawner;
