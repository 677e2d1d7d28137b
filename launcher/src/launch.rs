//! Launch orchestration: banner, plan, one child, outcome report.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument, warn};

use crate::banner::write_banner;
use crate::core::plan::LaunchPlan;
use crate::core::types::LaunchOutcome;
use crate::io::config::LaunchConfig;
use crate::io::spawner::ProcessSpawner;

/// What was launched and how it ended.
#[derive(Debug)]
pub struct LaunchReport {
    pub plan: LaunchPlan,
    pub outcome: LaunchOutcome,
}

/// Print the banner, start exactly one child for `config` and report how it ended.
///
/// Launch failures and interrupts are handled here: they are written to `out`
/// and returned in the report. Only failures to write status text are errors.
#[instrument(skip_all, fields(app_dir = %app_dir.display()))]
pub fn launch<S: ProcessSpawner, W: Write>(
    app_dir: &Path,
    config: &LaunchConfig,
    parent_env: impl IntoIterator<Item = (OsString, OsString)>,
    spawner: &S,
    out: &mut W,
) -> Result<LaunchReport> {
    write_banner(out, config, app_dir).context("write banner")?;
    // The child shares the terminal; everything buffered must land first.
    out.flush().context("flush status output")?;

    let plan = LaunchPlan::new(
        app_dir.to_path_buf(),
        &config.command,
        &config.runtime_dir,
        parent_env,
    );
    if plan.search_path.is_prepended() {
        info!(runtime_dir = %config.runtime_dir, "prepended runtime dir to child PATH");
    } else {
        debug!(runtime_dir = %config.runtime_dir, "runtime dir already on PATH");
    }

    let outcome = match spawner.run(&plan) {
        Ok(exit) => LaunchOutcome::from(exit),
        Err(err) => LaunchOutcome::Errored(err),
    };
    report_outcome(out, &outcome)?;

    Ok(LaunchReport { plan, outcome })
}

fn report_outcome<W: Write>(out: &mut W, outcome: &LaunchOutcome) -> Result<()> {
    match outcome {
        LaunchOutcome::StoppedByUser => {
            writeln!(out, "\nServer stopped by user.").context("write stop message")?;
        }
        LaunchOutcome::Errored(err) => {
            error!(err = %err, "launch failed");
            writeln!(out, "An error occurred: {err}").context("write error message")?;
        }
        LaunchOutcome::ChildExited { code: Some(0) } => {
            debug!("server exited cleanly");
        }
        LaunchOutcome::ChildExited { code } => {
            warn!(exit_code = ?code, "server exited with failure");
        }
    }
    out.flush().context("flush status output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search_path::SEPARATOR;
    use crate::core::types::{ChildExit, LaunchError};
    use crate::test_support::{ScriptedSpawner, env_of};
    use std::path::PathBuf;

    fn config() -> LaunchConfig {
        LaunchConfig {
            runtime_dir: "/opt/node/bin".to_string(),
            ..LaunchConfig::default()
        }
    }

    fn run(spawner: &ScriptedSpawner, parent_env: &[(&str, &str)]) -> (LaunchReport, String) {
        let mut out = Vec::new();
        let report = launch(
            Path::new("/srv/app"),
            &config(),
            env_of(parent_env),
            spawner,
            &mut out,
        )
        .expect("launch");
        (report, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn starts_one_child_with_literal_command_in_app_dir() {
        let spawner = ScriptedSpawner::exiting(0);
        let (report, output) = run(&spawner, &[("PATH", "/usr/bin")]);

        let plans = spawner.plans();
        assert_eq!(plans.len(), 1);
        let plan = plans.first().expect("plan");
        assert_eq!(plan.command_line, "npx expo start -c");
        assert_eq!(plan.workdir, PathBuf::from("/srv/app"));
        assert_eq!(
            plan.search_path_value(),
            Some(&OsString::from(format!("/opt/node/bin{SEPARATOR}/usr/bin")))
        );
        assert!(report.outcome.is_clean_exit());
        assert!(output.contains("Working directory: /srv/app"));
    }

    #[test]
    fn runtime_dir_already_on_path_is_not_added_again() {
        let spawner = ScriptedSpawner::exiting(0);
        let (report, _) = run(&spawner, &[("PATH", "/opt/node/bin:/usr/bin")]);

        assert!(!report.plan.search_path.is_prepended());
        assert_eq!(
            report.plan.search_path_value(),
            Some(&OsString::from("/opt/node/bin:/usr/bin"))
        );
    }

    #[test]
    fn interrupt_reports_stopped_by_user() {
        let spawner = ScriptedSpawner::new(vec![Ok(ChildExit::Interrupted)]);
        let (report, output) = run(&spawner, &[("PATH", "/usr/bin")]);

        assert!(matches!(report.outcome, LaunchOutcome::StoppedByUser));
        assert!(output.ends_with("\nServer stopped by user.\n"));
    }

    #[test]
    fn launch_error_is_reported_and_classified() {
        let spawner = ScriptedSpawner::new(vec![Err(LaunchError::ToolNotFound {
            tool: "npx".to_string(),
            search_path: OsString::from("/usr/bin"),
        })]);
        let (report, output) = run(&spawner, &[("PATH", "/usr/bin")]);

        assert!(matches!(
            report.outcome,
            LaunchOutcome::Errored(LaunchError::ToolNotFound { .. })
        ));
        assert!(output.contains("An error occurred: 'npx' was not found on the search path"));
    }

    #[test]
    fn failing_child_is_not_a_launch_error() {
        let spawner = ScriptedSpawner::exiting(1);
        let (report, output) = run(&spawner, &[("PATH", "/usr/bin")]);

        assert!(matches!(
            report.outcome,
            LaunchOutcome::ChildExited { code: Some(1) }
        ));
        assert!(!output.contains("An error occurred"));
        assert!(!output.contains("Server stopped by user."));
    }

    #[test]
    fn banner_precedes_outcome_message() {
        let spawner = ScriptedSpawner::new(vec![Ok(ChildExit::Interrupted)]);
        let (_, output) = run(&spawner, &[]);

        let banner = output.find("Press Ctrl+C").expect("banner");
        let stopped = output.find("Server stopped by user.").expect("stop message");
        assert!(banner < stopped);
    }
}
