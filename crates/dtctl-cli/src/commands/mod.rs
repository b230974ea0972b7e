//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`alias`] - Alias management
//! - [`config`] - Context management
//! - [`auth`] - Safety checks

pub mod alias;
pub mod auth;
pub mod config;

use std::io::Write;
use std::path::Path;

use dtctl_config::Config;

pub use alias::AliasCommand;
pub use auth::AuthCommand;
pub use config::ConfigCommand;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputFormat;

/// Runs a parsed command line against the loaded configuration.
///
/// Commands that change the configuration save it to `config_path`.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub fn run<W: Write>(
    cli: &Cli,
    config: &mut Config,
    config_path: &Path,
    out: &mut W,
) -> Result<(), CliError> {
    let format = OutputFormat::new(cli.output);

    match &cli.command {
        Commands::Alias { command } => {
            let mut cmd = AliasCommand::new(config, config_path);
            cmd.execute(out, &format, command)
        }
        Commands::Config { command } => {
            let mut cmd = ConfigCommand::new(config, config_path);
            cmd.execute(out, &format, command)
        }
        Commands::Auth { command } => {
            let cmd = AuthCommand::new(
                config,
                cli.context.as_deref(),
                cli.override_safety.map(Into::into),
            );
            cmd.execute(out, &format, command)
        }
    }
}
