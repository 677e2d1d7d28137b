//! Status text printed before the server takes over the terminal.

use std::io::{self, Write};
use std::path::Path;

use crate::io::config::LaunchConfig;

const RULE_WIDTH: usize = 50;

/// Write the banner, working directory and instructions for `config`.
pub fn write_banner<W: Write>(out: &mut W, config: &LaunchConfig, app_dir: &Path) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "Restarting your {}...", config.app_name)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Working directory: {}", app_dir.display())?;

    writeln!(out, "\nStarting {}...", config.server_label)?;
    for (idx, line) in config.instructions.iter().enumerate() {
        writeln!(out, "{}. {line}", idx + 1)?;
    }
    writeln!(out, "\nPress Ctrl+C to stop the server.\n")?;
    Ok(())
}
