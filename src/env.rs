use std::collections::HashMap;
use std::env as stdenv;
use crate::lookup::find_program;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const DEFAULT_SHELL: &str = "sh";

/// Where and with which shell a [`ShellExecutor`](crate::ShellExecutor) runs command lines.
///
/// `shell` is resolved against `PATH` from `vars` when it is a bare name, or
/// against `current_dir` when it is a relative path. Everything in `vars` is
/// passed on to the shell process.
#[derive(Debug, Clone)]
pub struct ShellEnvironment {
    pub vars: HashMap<String, String>,
    pub current_dir: PathBuf,
    pub shell: String,
}

impl ShellEnvironment {
    /// Capture the current process state.
    ///
    /// Copies variables from `std::env::vars()`, takes `current_dir` from
    /// `std::env::current_dir()` and uses `sh` as the shell.
    pub fn new() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            vars,
            current_dir,
            shell: DEFAULT_SHELL.to_string(),
        }
    }

    /// Get the value of a variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var`.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .cloned()
            .or_else(|| stdenv::var(key).ok())
    }

    /// Set or override a variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Locate the shell program, or `None` if it does not exist.
    pub(crate) fn resolve_shell(&self) -> Option<PathBuf> {
        let search_paths = self.get_var("PATH").unwrap_or_default();
        find_program(
            OsStr::new(&search_paths),
            &self.current_dir,
            Path::new(&self.shell),
        )
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = dir.into();
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.set_var(key, val);
        self
    }
}

impl Default for ShellEnvironment {
    fn default() -> Self {
        Self::new()
    }
}
