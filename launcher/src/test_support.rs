//! Test-only helpers: scripted spawners and throwaway app layouts.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::plan::LaunchPlan;
use crate::core::types::{ChildExit, LaunchError};
use crate::io::spawner::ProcessSpawner;

/// Spawner that records every plan and replays queued results in order.
///
/// Panics when asked to run more often than results were queued.
#[derive(Debug, Default)]
pub struct ScriptedSpawner {
    results: RefCell<VecDeque<Result<ChildExit, LaunchError>>>,
    plans: RefCell<Vec<LaunchPlan>>,
}

impl ScriptedSpawner {
    pub fn new(results: Vec<Result<ChildExit, LaunchError>>) -> Self {
        Self {
            results: RefCell::new(results.into()),
            plans: RefCell::new(Vec::new()),
        }
    }

    /// Spawner whose single child exits with `code`.
    pub fn exiting(code: i32) -> Self {
        Self::new(vec![Ok(ChildExit::Exited { code: Some(code) })])
    }

    /// Plans received so far.
    pub fn plans(&self) -> Vec<LaunchPlan> {
        self.plans.borrow().clone()
    }
}

impl ProcessSpawner for ScriptedSpawner {
    fn run(&self, plan: &LaunchPlan) -> Result<ChildExit, LaunchError> {
        self.plans.borrow_mut().push(plan.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .expect("scripted spawner ran out of results")
    }
}

/// Build an owned environment snapshot from string pairs.
pub fn env_of(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
    pairs
        .iter()
        .map(|(key, value)| (OsString::from(key), OsString::from(value)))
        .collect()
}

/// Temporary layout with an app directory and a separate runtime directory.
pub struct TestApp {
    _temp: TempDir,
    app_dir: PathBuf,
    runtime_dir: PathBuf,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = temp.path().canonicalize().context("canonicalize tempdir")?;
        let app_dir = root.join("app");
        let runtime_dir = root.join("runtime");
        fs::create_dir_all(&app_dir).context("create app dir")?;
        fs::create_dir_all(&runtime_dir).context("create runtime dir")?;
        Ok(Self {
            _temp: temp,
            app_dir,
            runtime_dir,
        })
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    /// Write an executable `sh` script named `name` into the runtime directory.
    #[cfg(unix)]
    pub fn write_tool(&self, name: &str, body: &str) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path = self.runtime_dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .with_context(|| format!("write {}", path.display()))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("chmod {}", path.display()))?;
        Ok(path)
    }
}
