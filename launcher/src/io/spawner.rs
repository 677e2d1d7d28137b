//! Spawner abstraction for starting the development server.
//!
//! The [`ProcessSpawner`] trait decouples launch orchestration from real
//! process creation. Tests use a scripted spawner that records plans and
//! returns predetermined exits without spawning anything.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::core::plan::LaunchPlan;
use crate::core::types::{ChildExit, LaunchError};
use crate::io::process::run_interactive;

/// Abstraction over how the planned command is executed.
pub trait ProcessSpawner {
    /// Start exactly one child for `plan` and block until it ends.
    fn run(&self, plan: &LaunchPlan) -> Result<ChildExit, LaunchError>;
}

/// Spawner that runs the command line through the platform shell.
#[derive(Debug, Clone)]
pub struct ShellSpawner {
    /// How long the child may keep running after Ctrl+C.
    pub interrupt_grace: Duration,
}

impl ShellSpawner {
    pub fn new(interrupt_grace: Duration) -> Self {
        Self { interrupt_grace }
    }
}

impl ProcessSpawner for ShellSpawner {
    #[instrument(skip_all, fields(command = %plan.command_line, workdir = %plan.workdir.display()))]
    fn run(&self, plan: &LaunchPlan) -> Result<ChildExit, LaunchError> {
        ensure_tool_on_path(plan)?;

        let mut cmd = Command::new(&plan.shell);
        cmd.arg(plan.shell_flag)
            .arg(&plan.command_line)
            .current_dir(&plan.workdir)
            .env_clear()
            .envs(plan.env.iter().map(|(key, value)| (key, value)));

        run_interactive(cmd, &plan.shell, self.interrupt_grace)
    }
}

/// Fail early when the shell would not find the command's program.
fn ensure_tool_on_path(plan: &LaunchPlan) -> Result<(), LaunchError> {
    let Some(tool) = plan.tool() else {
        return Ok(());
    };
    let search_path = plan.search_path_value().cloned().unwrap_or_default();

    match which::which_in(tool, Some(&search_path), &plan.workdir) {
        Ok(found) => {
            debug!(tool, resolved = %found.display(), "resolved tool");
            Ok(())
        }
        Err(err) => {
            warn!(tool, err = %err, "tool not found on search path");
            Err(LaunchError::ToolNotFound {
                tool: tool.to_string(),
                search_path,
            })
        }
    }
}
