//! Resolution of a single launch into an inspectable plan.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::core::search_path::{PATH_KEY, SearchPathUpdate, extend_search_path, is_path_key};

/// Everything needed to start the child, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Working directory for the child (the launcher's own directory).
    pub workdir: PathBuf,
    /// Command interpreter program (`sh` or `cmd`).
    pub shell: String,
    /// Interpreter flag that introduces the command line (`-c` or `/C`).
    pub shell_flag: &'static str,
    /// Literal command line handed to the interpreter.
    pub command_line: String,
    /// Complete environment for the child; nothing is inherited implicitly.
    pub env: Vec<(OsString, OsString)>,
    /// What happened to the search path while deriving `env`.
    pub search_path: SearchPathUpdate,
}

impl LaunchPlan {
    /// Build a plan from the parent's environment without touching it.
    pub fn new(
        workdir: PathBuf,
        command_line: &str,
        runtime_dir: &str,
        parent_env: impl IntoIterator<Item = (OsString, OsString)>,
    ) -> Self {
        let (env, search_path) = child_env(parent_env, runtime_dir);
        let (shell, shell_flag) = shell_command();
        Self {
            workdir,
            shell,
            shell_flag,
            command_line: command_line.to_string(),
            env,
            search_path,
        }
    }

    /// Value of the search-path variable the child will see.
    pub fn search_path_value(&self) -> Option<&OsString> {
        self.env
            .iter()
            .find(|(key, _)| is_path_key(key))
            .map(|(_, value)| value)
    }

    /// Program the shell will look up, when the command line is a plain invocation.
    ///
    /// `None` whenever the line uses shell syntax (operators, expansions,
    /// quoting, leading assignments, builtins); the shell resolves those itself.
    pub fn tool(&self) -> Option<&str> {
        if self.command_line.contains(SHELL_OPERATORS) {
            return None;
        }
        let first = self.command_line.split_whitespace().next()?;
        if first.contains(['=', '"', '\'', '\\']) || SHELL_BUILTINS.contains(&first) {
            return None;
        }
        Some(first)
    }
}

/// Characters that make a command line more than a single program invocation.
const SHELL_OPERATORS: &[char] = &[
    '&', '|', ';', '<', '>', '(', ')', '`', '$', '%', '^', '\n', '{', '}', '*', '?', '~',
];

/// Words resolved by the interpreter rather than looked up on `PATH`.
const SHELL_BUILTINS: &[&str] = &[
    ".", "!", "call", "case", "cd", "command", "eval", "exec", "exit", "export", "for", "if",
    "set", "source", "start", "time", "until", "while",
];

/// Copy `parent_env`, overriding only the search-path entry.
fn child_env(
    parent_env: impl IntoIterator<Item = (OsString, OsString)>,
    runtime_dir: &str,
) -> (Vec<(OsString, OsString)>, SearchPathUpdate) {
    let mut env: Vec<(OsString, OsString)> = parent_env.into_iter().collect();
    let slot = env.iter().position(|(key, _)| is_path_key(key));
    let current = slot.and_then(|idx| env.get(idx)).map(|(_, value)| value.as_os_str());

    let update = extend_search_path(current, runtime_dir);
    if let SearchPathUpdate::Prepended(value) = &update {
        match slot.and_then(|idx| env.get_mut(idx)) {
            Some(entry) => entry.1 = value.clone(),
            None => env.push((OsString::from(PATH_KEY), value.clone())),
        }
    }
    (env, update)
}

/// Platform command interpreter and its command-line flag.
pub fn shell_command() -> (String, &'static str) {
    if cfg!(windows) {
        ("cmd".into(), "/C")
    } else {
        ("sh".into(), "-c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search_path::SEPARATOR;

    fn env(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(key, value)| (OsString::from(key), OsString::from(value)))
            .collect()
    }

    #[test]
    fn plan_overrides_only_the_search_path() {
        let plan = LaunchPlan::new(
            PathBuf::from("/srv/app"),
            "npx expo start -c",
            "/opt/node/bin",
            env(&[("HOME", "/home/dev"), ("PATH", "/usr/bin")]),
        );

        let expected_path = format!("/opt/node/bin{SEPARATOR}/usr/bin");
        assert_eq!(
            plan.env,
            env(&[("HOME", "/home/dev"), ("PATH", expected_path.as_str())])
        );
        assert!(plan.search_path.is_prepended());
        assert_eq!(plan.workdir, PathBuf::from("/srv/app"));
    }

    #[test]
    fn plan_keeps_env_when_runtime_dir_present() {
        let parent = env(&[("PATH", "/opt/node/bin:/usr/bin")]);
        let plan = LaunchPlan::new(
            PathBuf::from("/srv/app"),
            "npx expo start -c",
            "/opt/node/bin",
            parent.clone(),
        );
        assert_eq!(plan.env, parent);
        assert_eq!(plan.search_path, SearchPathUpdate::Unchanged);
    }

    #[test]
    fn plan_adds_path_when_parent_has_none() {
        let plan = LaunchPlan::new(
            PathBuf::from("/srv/app"),
            "npx expo start -c",
            "/opt/node/bin",
            env(&[("HOME", "/home/dev")]),
        );
        assert_eq!(
            plan.search_path_value(),
            Some(&OsString::from("/opt/node/bin"))
        );
    }

    #[test]
    fn tool_is_first_word_of_command_line() {
        let plan = LaunchPlan::new(
            PathBuf::from("/srv/app"),
            "npx expo start -c",
            "/opt/node/bin",
            Vec::new(),
        );
        assert_eq!(plan.tool(), Some("npx"));
        assert_eq!(plan.command_line, "npx expo start -c");
    }

    #[test]
    fn shell_syntax_has_no_tool_to_check() {
        let commands = [
            "EXPO_NO_TELEMETRY=1 npx expo start -c",
            "exec npx expo start -c",
            "cd . && npx expo start -c",
            "npx expo start -c | tee expo.log",
            "\"C:\\Program Files\\nodejs\\npx\" expo start -c",
            "npx expo start --port $PORT",
        ];
        for command in commands {
            let plan = LaunchPlan::new(PathBuf::from("/srv/app"), command, "/opt/node/bin", Vec::new());
            assert_eq!(plan.tool(), None, "{command}");
        }
    }

    #[test]
    fn plain_path_to_program_is_checked() {
        let plan = LaunchPlan::new(
            PathBuf::from("/srv/app"),
            "/opt/node/bin/npx expo start -c",
            "/opt/node/bin",
            Vec::new(),
        );
        assert_eq!(plan.tool(), Some("/opt/node/bin/npx"));
    }
}
