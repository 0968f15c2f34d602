use crate::env::ShellEnvironment;
use std::process::{Command, Output};
use thiserror::Error;
use tracing::{debug, warn};

/// Captured output of a successful run, trimmed of surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
}

/// Failure reported by an [`Executor`].
///
/// The captured output of a failed command is kept exactly as the process
/// produced it.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("shell '{shell}' not found")]
    ShellNotFound { shell: String },

    #[error("failed to launch shell: {0}")]
    Launch(#[from] std::io::Error),

    #[error("command failed ({}): {command}", describe_code(.code))]
    Failed {
        command: String,
        /// Exit code, or `None` when the process was terminated by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Anything that can run a rendered command line and capture its output.
pub trait Executor {
    /// Run `command_line` to completion.
    fn run(&self, command_line: &str) -> Result<ExecutionResult, ExecutionError>;
}

/// Runs command lines with `<shell> -c <command line>`.
///
/// Example
/// ```
/// use command_line::{Executor, ShellExecutor};
///
/// let result = ShellExecutor::default().run("echo hello").unwrap();
/// assert_eq!(result.stdout, "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    env: ShellEnvironment,
}

impl ShellExecutor {
    pub fn new(env: ShellEnvironment) -> Self {
        Self { env }
    }

    /// Environment the shell is started in.
    pub fn env(&self) -> &ShellEnvironment {
        &self.env
    }
}

impl Executor for ShellExecutor {
    fn run(&self, command_line: &str) -> Result<ExecutionResult, ExecutionError> {
        let shell = self.env.resolve_shell().ok_or_else(|| ExecutionError::ShellNotFound {
            shell: self.env.shell.clone(),
        })?;

        debug!(shell = %shell.display(), command = command_line, "running command line");
        let output = Command::new(&shell)
            .arg("-c")
            .arg(command_line)
            .envs(self.env.vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(&self.env.current_dir)
            .output()?;

        into_result(command_line, output)
    }
}

fn into_result(command_line: &str, output: Output) -> Result<ExecutionResult, ExecutionError> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        let code = output.status.code();
        warn!(command = command_line, ?code, "command line failed");
        return Err(ExecutionError::Failed {
            command: command_line.to_string(),
            code,
            stdout: stdout.into_owned(),
            stderr: stderr.into_owned(),
        });
    }

    Ok(ExecutionResult {
        stdout: stdout.trim().to_string(),
        stderr: stderr.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_trims_captured_output() {
        let result = ShellExecutor::default()
            .run("printf '  padded  \\n'; printf '\\n oops \\n' >&2")
            .unwrap();

        assert_eq!(result.stdout, "padded");
        assert_eq!(result.stderr, "oops");
    }

    #[test]
    #[cfg(unix)]
    fn test_failure_keeps_raw_output() {
        let err = ShellExecutor::default()
            .run("echo partial; echo broken >&2; exit 2")
            .unwrap_err();

        match err {
            ExecutionError::Failed {
                command,
                code,
                stdout,
                stderr,
            } => {
                assert_eq!(command, "echo partial; echo broken >&2; exit 2");
                assert_eq!(code, Some(2));
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_command_not_found_is_failure() {
        let err = ShellExecutor::default()
            .run("definitely-not-a-real-command-12345")
            .unwrap_err();

        match err {
            ExecutionError::Failed { code, stderr, .. } => {
                assert_eq!(code, Some(127));
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_shell() {
        let env = ShellEnvironment::new().with_shell("no-such-shell-12345");
        let err = ShellExecutor::new(env).run("true").unwrap_err();

        assert!(matches!(err, ExecutionError::ShellNotFound { ref shell } if shell == "no-such-shell-12345"));
        assert_eq!(err.to_string(), "shell 'no-such-shell-12345' not found");
    }

    #[test]
    #[cfg(unix)]
    fn test_non_executable_shell_is_launch_error() {
        let dir = std::env::temp_dir().join(format!("executor_tests_{}_noexec", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        let shell = dir.join("not-a-shell");
        std::fs::write(&shell, "#!/bin/sh\n").expect("write shell file");

        let env = ShellEnvironment::new().with_shell(shell.to_string_lossy());
        let executor = ShellExecutor::new(env);
        assert_eq!(executor.env().shell, shell.to_string_lossy());

        let err = executor.run("true").unwrap_err();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(
            matches!(err, ExecutionError::Launch(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_uses_environment_vars_and_dir() {
        let env = ShellEnvironment::new()
            .with_var("GREETING", "hello")
            .with_current_dir("/");
        let result = ShellExecutor::new(env).run("echo $GREETING; pwd").unwrap();

        assert_eq!(result.stdout, "hello\n/");
    }

    #[test]
    fn test_failed_error_message() {
        let err = ExecutionError::Failed {
            command: "false".to_string(),
            code: Some(1),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command failed (exit code 1): false");

        let err = ExecutionError::Failed {
            command: "sleep 10".to_string(),
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "command failed (terminated by signal): sleep 10");
    }
}
