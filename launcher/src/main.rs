//! Development server launcher.
//!
//! Changes into its own directory, puts the Node.js runtime on the child's
//! `PATH` and hands the terminal to `npx expo start -c` until it exits or
//! Ctrl+C is pressed.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use devlaunch::exit_codes;
use devlaunch::io::app_dir::{enter_app_dir, resolve_app_dir};
use devlaunch::io::config::{CONFIG_FILE_NAME, load_config};
use devlaunch::io::spawner::ShellSpawner;
use devlaunch::launch::launch;
use devlaunch::logging;

#[derive(Parser)]
#[command(
    name = "devlaunch",
    version,
    about = "Start the Expo development server for this app with a cleared cache"
)]
struct Cli {}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::SETUP_FAILED
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let _cli = Cli::parse();

    let app_dir = resolve_app_dir()?;
    enter_app_dir(&app_dir)?;
    let config = load_config(&app_dir.join(CONFIG_FILE_NAME))?;

    let spawner = ShellSpawner::new(config.interrupt_grace());
    let mut stdout = std::io::stdout();
    let report = launch(&app_dir, &config, std::env::vars_os(), &spawner, &mut stdout)?;

    // Handled outcomes never change the exit status; the child's code is only logged.
    debug!(outcome = ?report.outcome, "launcher finished");
    Ok(exit_codes::OK)
}
