//! Context management command implementation.

use std::io::Write;
use std::path::Path;

use dtctl_config::{Config, ConfigError, ContextUpdate};
use tracing::info;

use crate::cli::ConfigCommands;
use crate::error::CliError;
use crate::output::{ConfigView, ContextList, CurrentContext, OutputFormat, StatusMessage};

/// Handler for config subcommands.
pub struct ConfigCommand<'a> {
    config: &'a mut Config,
    config_path: &'a Path,
}

impl<'a> ConfigCommand<'a> {
    /// Creates a new config command handler.
    #[must_use]
    pub fn new(config: &'a mut Config, config_path: &'a Path) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Executes the config subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &ConfigCommands,
    ) -> Result<(), CliError> {
        match command {
            ConfigCommands::View => {
                format.write(
                    out,
                    &ConfigView {
                        config: self.config,
                    },
                )?;
            }
            ConfigCommands::CurrentContext => {
                let name = self
                    .config
                    .current_context
                    .clone()
                    .ok_or(ConfigError::NoCurrentContext)?;
                format.write(out, &CurrentContext { name })?;
            }
            ConfigCommands::GetContexts => {
                format.write(out, &ContextList::from_config(self.config))?;
            }
            ConfigCommands::UseContext { name } => {
                self.config.use_context(name)?;
                self.config.save(self.config_path)?;
                info!(context = %name, "switched context");
                format.write(
                    out,
                    &StatusMessage::ok(format!("Switched to context '{name}'")),
                )?;
            }
            ConfigCommands::SetContext {
                name,
                environment,
                safety_level,
                user_id,
            } => {
                let update = ContextUpdate {
                    environment: environment.clone(),
                    safety_level: safety_level.map(Into::into),
                    user_id: user_id.clone(),
                };
                let created = self.config.set_context(name, update);
                self.config.save(self.config_path)?;
                let verb = if created { "created" } else { "updated" };
                format.write(out, &StatusMessage::ok(format!("Context '{name}' {verb}")))?;
            }
            ConfigCommands::DeleteContext { name } => {
                self.config.delete_context(name)?;
                self.config.save(self.config_path)?;
                format.write(out, &StatusMessage::ok(format!("Context '{name}' deleted")))?;
            }
        }
        Ok(())
    }
}
