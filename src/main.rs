use anyhow::{Context, Result, anyhow};
use argh::FromArgs;
use command_line::{ArgumentConfig, CommandLine, ExecutionError};
use std::process::ExitCode;

#[derive(FromArgs, Debug)]
/// Assemble a shell command line and print or run it.
struct Cli {
    #[argh(option, short = 'e')]
    /// environment variable assignment placed before the command, as KEY=VALUE.
    env: Vec<String>,

    #[argh(option, short = 'f')]
    /// flag passed verbatim after the command.
    flag: Vec<String>,

    #[argh(option, short = 'o')]
    /// option as KEY=VALUE, rendered with the option separator.
    option: Vec<String>,

    #[argh(option, short = 's')]
    /// separator between option keys and values. Defaults to a single space.
    separator: Option<String>,

    #[argh(switch, short = 'w')]
    /// wrap every positional argument in double quotes.
    wrap: bool,

    #[argh(switch, short = 'x')]
    /// run the command line through `sh -c` instead of printing it.
    execute: bool,

    #[argh(switch)]
    /// enable debug logging.
    debug: bool,

    #[argh(positional)]
    /// application to invoke.
    application: String,

    #[argh(positional, greedy)]
    /// positional arguments for the application.
    args: Vec<String>,
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    pair.split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{pair}'"))
}

fn build(cli: &Cli) -> Result<CommandLine> {
    let mut line = CommandLine::for_command(cli.application.as_str());
    for pair in &cli.env {
        let (key, value) = split_pair(pair).context("invalid --env")?;
        line = line.with_environment_variable(key, value);
    }
    for flag in &cli.flag {
        line = line.with_flag(flag.as_str());
    }
    for pair in &cli.option {
        let (key, value) = split_pair(pair).context("invalid --option")?;
        line = line.with_option(key, value);
    }
    if let Some(separator) = &cli.separator {
        line = line.with_option_separator(separator.as_str());
    }
    let config = ArgumentConfig { wrap: cli.wrap };
    for arg in &cli.args {
        line = line.with_argument_config(arg.as_str(), config);
    }
    Ok(line)
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let line = build(cli)?;
    if !cli.execute {
        println!("{line}");
        return Ok(ExitCode::SUCCESS);
    }

    match line.execute() {
        Ok(result) => {
            print_nonempty(&result.stdout, &result.stderr);
            Ok(ExitCode::SUCCESS)
        }
        Err(ExecutionError::Failed {
            code, stdout, stderr, ..
        }) => {
            print!("{stdout}");
            eprint!("{stderr}");
            let code = code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1);
            Ok(ExitCode::from(code))
        }
        Err(e) => Err(e).with_context(|| format!("can't execute '{line}'")),
    }
}

fn print_nonempty(stdout: &str, stderr: &str) {
    if !stdout.is_empty() {
        println!("{stdout}");
    }
    if !stderr.is_empty() {
        eprintln!("{stderr}");
    }
}

fn main() -> ExitCode {
    let cli: Cli = argh::from_env();
    init_logging(cli.debug);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
