//! Shared launch types: child exits, outcomes and classified errors.

use std::ffi::OsString;
use std::io;

use thiserror::Error;

/// How the child process ended, as seen by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Child exited by itself. `code` is `None` when it was killed by a signal.
    Exited { code: Option<i32> },
    /// User interrupted the wait (Ctrl+C).
    Interrupted,
}

/// Terminal state of one launch.
#[derive(Debug)]
pub enum LaunchOutcome {
    ChildExited { code: Option<i32> },
    StoppedByUser,
    Errored(LaunchError),
}

impl LaunchOutcome {
    /// Whether the child ran and exited with status zero.
    pub fn is_clean_exit(&self) -> bool {
        matches!(self, Self::ChildExited { code: Some(0) })
    }
}

impl From<ChildExit> for LaunchOutcome {
    fn from(exit: ChildExit) -> Self {
        match exit {
            ChildExit::Exited { code } => Self::ChildExited { code },
            ChildExit::Interrupted => Self::StoppedByUser,
        }
    }
}

/// Classified failures while starting or waiting on the child.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("'{tool}' was not found on the search path {search_path:?}")]
    ToolNotFound { tool: String, search_path: OsString },

    #[error("failed to start command interpreter '{shell}': {source}")]
    ShellSpawn {
        shell: String,
        #[source]
        source: io::Error,
    },

    #[error("failed while waiting for the server process: {source}")]
    Wait {
        #[source]
        source: io::Error,
    },

    #[error("failed to install the interrupt handler: {source}")]
    Signal {
        #[source]
        source: io::Error,
    },

    #[error("failed to start the process runtime: {source}")]
    Runtime {
        #[source]
        source: io::Error,
    },
}
