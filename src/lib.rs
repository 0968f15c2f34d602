//! A small fluent builder for shell command lines.
//!
//! [`CommandLine`] collects environment variable assignments, flags, options and
//! positional arguments, and renders them into a single string in the order a
//! POSIX shell expects:
//!
//! ```text
//! ENV=value application --flag --option value argument
//! ```
//!
//! The rendered string can be executed through an [`Executor`]. The default
//! [`ShellExecutor`] hands it to `sh -c` and captures standard output and
//! standard error. No escaping is performed: what you put in is what the shell
//! sees.

mod builder;
pub mod env;
pub mod executor;
mod lookup;

/// Re-export of the command line builder and its per-call configuration.
///
/// See [`CommandLine`] for the rendering rules and examples.
pub use builder::{ArgumentConfig, CommandLine, OptionConfig};
pub use executor::{ExecutionError, ExecutionResult, Executor, ShellExecutor};
