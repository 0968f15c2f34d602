use crate::executor::{ExecutionError, ExecutionResult, Executor, ShellExecutor};
use std::fmt;

const DEFAULT_OPTION_SEPARATOR: &str = " ";

/// Per-call configuration for [`CommandLine::with_option`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionConfig {
    /// Separator placed between the option key and its value.
    ///
    /// `None` (or an empty string) means the builder's default separator is used,
    /// resolved when the command line is rendered.
    pub separator: Option<String>,
}

impl OptionConfig {
    /// Configuration with an explicit separator for a single option.
    pub fn separator(separator: impl Into<String>) -> Self {
        Self {
            separator: Some(separator.into()),
        }
    }
}

/// Per-call configuration for [`CommandLine::with_argument`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgumentConfig {
    /// Enclose the argument in double quotes when it is added.
    pub wrap: bool,
}

impl ArgumentConfig {
    /// Configuration that wraps the argument in double quotes.
    pub fn wrapped() -> Self {
        Self { wrap: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EnvironmentVariable {
    key: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CommandOption {
    key: String,
    value: String,
    separator: Option<String>,
}

/// Fluent builder for a single shell command line.
///
/// Fragments are kept in four ordered categories and rendered as
/// `[environment] application [flags] [options] [arguments]`, no matter in which
/// order the `with_*` methods were called. Insertion order inside a category is
/// preserved and duplicates are kept as-is.
///
/// Example
/// ```
/// use command_line::CommandLine;
///
/// let line = CommandLine::for_command("command-with-options")
///     .with_environment_variable("LOCAL", "true")
///     .with_flag("-v")
///     .with_option("--opt1", "val1")
///     .with_argument("path/to/file.txt");
///
/// assert_eq!(
///     line.render(),
///     "LOCAL=true command-with-options -v --opt1 val1 path/to/file.txt"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    application: String,
    environment_variables: Vec<EnvironmentVariable>,
    flags: Vec<String>,
    options: Vec<CommandOption>,
    arguments: Vec<String>,
    separator: String,
}

impl CommandLine {
    /// Start a command line for `application`. The name is not validated.
    pub fn for_command(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            environment_variables: Vec::new(),
            flags: Vec::new(),
            options: Vec::new(),
            arguments: Vec::new(),
            separator: DEFAULT_OPTION_SEPARATOR.to_string(),
        }
    }

    /// Application name the command line was started with.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Separator used by options that were added without their own.
    pub fn option_separator(&self) -> &str {
        &self.separator
    }

    /// Prepend a `key=value` assignment to the command.
    pub fn with_environment_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.push(EnvironmentVariable {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Add a bare flag such as `-v`, verbatim.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Add an option using the default separator.
    pub fn with_option(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_option_config(key, value, OptionConfig::default())
    }

    /// Add an option, optionally overriding the separator for this entry only.
    pub fn with_option_config(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        config: OptionConfig,
    ) -> Self {
        self.options.push(CommandOption {
            key: key.into(),
            value: value.into(),
            separator: config.separator.filter(|s| !s.is_empty()),
        });
        self
    }

    /// Replace the default option separator.
    ///
    /// Applies to every option without its own separator, including the ones
    /// added before this call.
    pub fn with_option_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Add a positional argument.
    pub fn with_argument(self, argument: impl Into<String>) -> Self {
        self.with_argument_config(argument, ArgumentConfig::default())
    }

    /// Add a positional argument, wrapping it in double quotes if requested.
    ///
    /// The quotes become part of the stored argument right away.
    pub fn with_argument_config(mut self, argument: impl Into<String>, config: ArgumentConfig) -> Self {
        let argument = argument.into();
        let argument = if config.wrap {
            format!("\"{argument}\"")
        } else {
            argument
        };
        self.arguments.push(argument);
        self
    }

    /// Render the command line. Never fails and has no side effects.
    pub fn render(&self) -> String {
        let environment_variables = self
            .environment_variables
            .iter()
            .map(|var| format!("{}={}", var.key, var.value))
            .collect::<Vec<_>>()
            .join(" ");
        let flags = self.flags.join(" ");
        let options = self
            .options
            .iter()
            .map(|option| {
                let separator = option.separator.as_deref().unwrap_or(&self.separator);
                format!("{}{}{}", option.key, separator, option.value)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let arguments = self.arguments.join(" ");

        [
            environment_variables.as_str(),
            self.application.as_str(),
            flags.as_str(),
            options.as_str(),
            arguments.as_str(),
        ]
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Run the rendered command line through `sh -c`.
    ///
    /// Returns trimmed stdout and stderr, or the underlying failure when the
    /// shell cannot be started or the command exits with a non-zero status.
    pub fn execute(&self) -> Result<ExecutionResult, ExecutionError> {
        self.execute_with(&ShellExecutor::default())
    }

    /// Run the rendered command line through the given executor.
    pub fn execute_with(&self, executor: &dyn Executor) -> Result<ExecutionResult, ExecutionError> {
        executor.run(&self.render())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
