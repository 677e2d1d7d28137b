//! Launcher configuration, optionally read from `launcher.toml` next to the binary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

/// File name looked up in the launcher's own directory.
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

#[cfg(windows)]
const DEFAULT_RUNTIME_DIR: &str = r"C:\Program Files\nodejs";
#[cfg(not(windows))]
const DEFAULT_RUNTIME_DIR: &str = "/usr/local/bin";

/// Launcher configuration (TOML).
///
/// Every field defaults to the built-in launch, so a missing file and an
/// empty file behave the same.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LaunchConfig {
    /// Directory holding the Node.js binaries; prepended to the child's `PATH`.
    pub runtime_dir: String,

    /// Command line handed to the platform shell.
    pub command: String,

    /// Shown in the banner as `Restarting your <app_name>...`.
    pub app_name: String,

    /// Description of what is being started.
    pub server_label: String,

    /// Numbered hints printed before the server starts.
    pub instructions: Vec<String>,

    /// Seconds the server gets to exit on its own after Ctrl+C before it is killed.
    pub interrupt_grace_secs: u64,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            runtime_dir: DEFAULT_RUNTIME_DIR.to_string(),
            command: "npx expo start -c".to_string(),
            app_name: "Social Web App".to_string(),
            server_label: "Expo Server with Cache Clearing (-c)".to_string(),
            instructions: vec![
                "A QR Code will appear in this terminal.".to_string(),
                "Scan it with the 'Expo Go' app.".to_string(),
            ],
            interrupt_grace_secs: 10,
        }
    }
}

impl LaunchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.command.trim().is_empty() {
            return Err(anyhow!("command must be non-empty"));
        }
        if self.runtime_dir.trim().is_empty() {
            return Err(anyhow!("runtime_dir must be non-empty"));
        }
        if self.interrupt_grace_secs == 0 {
            return Err(anyhow!("interrupt_grace_secs must be > 0"));
        }
        Ok(())
    }

    pub fn interrupt_grace(&self) -> Duration {
        Duration::from_secs(self.interrupt_grace_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LaunchConfig::default()`.
pub fn load_config(path: &Path) -> Result<LaunchConfig> {
    if !path.exists() {
        let cfg = LaunchConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LaunchConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
