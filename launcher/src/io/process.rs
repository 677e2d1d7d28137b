//! Helpers for running an interactive child process until it exits or the user interrupts.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::runtime::Builder;
use tracing::{debug, error, info, instrument, warn};

use crate::core::types::{ChildExit, LaunchError};

/// Run `cmd` with inherited stdio and block until it exits.
///
/// The interrupt listener is installed before the child is spawned, so Ctrl+C
/// never takes the launcher down. On interrupt the child (which got the same
/// console signal) has `grace` to exit before it is killed; a second interrupt
/// kills it immediately.
#[instrument(skip_all, fields(shell = shell, grace_secs = grace.as_secs()))]
pub fn run_interactive(
    cmd: Command,
    shell: &str,
    grace: Duration,
) -> Result<ChildExit, LaunchError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| LaunchError::Runtime { source })?;

    runtime.block_on(supervise(cmd, shell, grace))
}

async fn supervise(
    mut cmd: Command,
    shell: &str,
    grace: Duration,
) -> Result<ChildExit, LaunchError> {
    let mut interrupt = Interrupt::install().map_err(|source| LaunchError::Signal { source })?;

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(source) => {
            error!(err = %source, "failed to spawn command");
            return Err(LaunchError::ShellSpawn {
                shell: shell.to_string(),
                source,
            });
        }
    };

    tokio::select! {
        biased;
        () = interrupt.recv() => {
            info!("interrupt received, stopping server");
            stop_after_interrupt(&mut child, &mut interrupt, grace).await?;
            Ok(ChildExit::Interrupted)
        }
        status = child.wait() => {
            let status = status.map_err(|source| LaunchError::Wait { source })?;
            debug!(exit_code = ?status.code(), "command finished");
            if killed_by_interrupt(&status) {
                return Ok(ChildExit::Interrupted);
            }
            Ok(ChildExit::Exited { code: status.code() })
        }
    }
}

async fn stop_after_interrupt(
    child: &mut Child,
    interrupt: &mut Interrupt,
    grace: Duration,
) -> Result<(), LaunchError> {
    let must_kill = tokio::select! {
        biased;
        () = interrupt.recv() => {
            warn!("second interrupt received, killing server");
            true
        }
        waited = tokio::time::timeout(grace, child.wait()) => match waited {
            Ok(status) => {
                let status = status.map_err(|source| LaunchError::Wait { source })?;
                debug!(exit_code = ?status.code(), "server exited after interrupt");
                false
            }
            Err(_) => {
                warn!(
                    grace_secs = grace.as_secs(),
                    "server still running after interrupt, killing"
                );
                true
            }
        },
    };

    if must_kill {
        child
            .kill()
            .await
            .map_err(|source| LaunchError::Wait { source })?;
    }
    Ok(())
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    use tokio::signal::unix::SignalKind;

    status.signal() == Some(SignalKind::interrupt().as_raw_value())
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

/// Console interrupt (Ctrl+C) listener.
struct Interrupt {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl Interrupt {
    #[cfg(unix)]
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            inner: signal(SignalKind::interrupt())?,
        })
    }

    #[cfg(windows)]
    fn install() -> io::Result<Self> {
        Ok(Self {
            inner: tokio::signal::windows::ctrl_c()?,
        })
    }

    /// Resolves on the next interrupt. Never resolves once the listener is closed.
    async fn recv(&mut self) {
        if self.inner.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
