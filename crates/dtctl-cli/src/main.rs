//! dtctl CLI binary entrypoint.
//!
//! This is the main entry point for the `dtctl` command-line tool.

use std::io;
use std::iter;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dtctl_cli::shell::run_shell;
use dtctl_cli::{BIN_NAME, BuiltinCommands, Cli, CliError, Dispatch, commands, expand_args};
use dtctl_config::Config;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<ExitCode, CliError> {
    let config_path = Config::default_path()?;
    let mut config = Config::load(&config_path)?;

    match expand_args(args, &config.aliases, &BuiltinCommands::for_cli())? {
        Dispatch::Shell(command) => run_shell(&command),
        Dispatch::Argv(argv) => {
            debug!(?argv, "dispatching");
            let cli = Cli::parse_from(iter::once(BIN_NAME.to_string()).chain(argv));
            let mut stdout = io::stdout().lock();
            commands::run(&cli, &mut config, &config_path, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
