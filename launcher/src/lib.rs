//! Development server launcher.
//!
//! Starts the app's development server (`npx expo start -c` by default) from
//! the launcher's own directory, with the Node.js runtime directory on the
//! child's `PATH`. The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (search-path extension, launch
//!   plans, outcome types). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (own location, config file,
//!   process spawning, interrupt handling). Isolated behind
//!   [`io::spawner::ProcessSpawner`] to enable scripted tests.
//!
//! [`launch`] coordinates core logic with I/O to implement the binary.

pub mod banner;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
