//! Alias management command implementation.

use std::fs;
use std::io::Write;
use std::path::Path;

use dtctl_alias::AliasTable;
use dtctl_config::Config;
use tracing::info;

use crate::builtin::BuiltinCommands;
use crate::cli::AliasCommands;
use crate::error::CliError;
use crate::output::{AliasList, OutputFormat, StatusMessage};

/// Handler for alias subcommands.
pub struct AliasCommand<'a> {
    config: &'a mut Config,
    config_path: &'a Path,
    builtins: BuiltinCommands,
}

impl<'a> AliasCommand<'a> {
    /// Creates a new alias command handler.
    #[must_use]
    pub fn new(config: &'a mut Config, config_path: &'a Path) -> Self {
        Self {
            config,
            config_path,
            builtins: BuiltinCommands::for_cli(),
        }
    }

    /// Executes the alias subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &AliasCommands,
    ) -> Result<(), CliError> {
        match command {
            AliasCommands::Set { name, expansion } => self.set(out, format, name, expansion),
            AliasCommands::List => self.list(out, format),
            AliasCommands::Delete { name } => self.delete(out, format, name),
            AliasCommands::Import { file, overwrite } => self.import(out, format, file, *overwrite),
            AliasCommands::Export { file } => self.export(out, format, file.as_deref()),
        }
    }

    fn set<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
        expansion: &str,
    ) -> Result<(), CliError> {
        let previous = self.config.aliases.set(name, expansion, &self.builtins)?;
        self.config.save(self.config_path)?;
        info!(alias = name, "alias saved");

        let verb = if previous.is_some() { "updated" } else { "created" };
        format.write(out, &StatusMessage::ok(format!("Alias '{name}' {verb}")))?;
        Ok(())
    }

    fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let list = AliasList {
            aliases: self.config.aliases.list(),
        };
        format.write(out, &list)?;
        Ok(())
    }

    fn delete<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        name: &str,
    ) -> Result<(), CliError> {
        self.config.aliases.delete(name)?;
        self.config.save(self.config_path)?;

        format.write(out, &StatusMessage::ok(format!("Alias '{name}' deleted")))?;
        Ok(())
    }

    fn import<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        file: &Path,
        overwrite: bool,
    ) -> Result<(), CliError> {
        let content = fs::read_to_string(file).map_err(|source| CliError::File {
            path: file.to_path_buf(),
            source,
        })?;
        let incoming: AliasTable = if content.trim().is_empty() {
            AliasTable::new()
        } else {
            serde_yaml::from_str(&content).map_err(|source| CliError::AliasFile {
                path: file.to_path_buf(),
                source,
            })?
        };

        let count = self
            .config
            .aliases
            .import(&incoming, overwrite, &self.builtins)?;
        self.config.save(self.config_path)?;

        format.write(
            out,
            &StatusMessage::ok(format!(
                "Imported {count} alias(es) from {}",
                file.display()
            )),
        )?;
        Ok(())
    }

    fn export<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        file: Option<&Path>,
    ) -> Result<(), CliError> {
        let yaml = serde_yaml::to_string(&self.config.aliases)
            .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))?;

        match file {
            Some(path) => {
                fs::write(path, yaml).map_err(|source| CliError::File {
                    path: path.to_path_buf(),
                    source,
                })?;
                format.write(
                    out,
                    &StatusMessage::ok(format!(
                        "Exported {} alias(es) to {}",
                        self.config.aliases.len(),
                        path.display()
                    )),
                )?;
            }
            None => write!(out, "{yaml}")?,
        }
        Ok(())
    }
}
