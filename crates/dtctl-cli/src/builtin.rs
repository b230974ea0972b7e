//! Names of the commands built into the CLI.

use std::collections::BTreeSet;

use clap::CommandFactory;
use dtctl_alias::CommandRegistry;

use crate::cli::Cli;

/// Top-level command names (and their aliases) that user aliases may not take.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltinCommands {
    names: BTreeSet<String>,
}

impl BuiltinCommands {
    /// Collects the top-level subcommands of `command`, plus `help`.
    #[must_use]
    pub fn from_command(command: &clap::Command) -> Self {
        let mut names = BTreeSet::from(["help".to_string()]);
        for sub in command.get_subcommands() {
            names.insert(sub.get_name().to_string());
            names.extend(sub.get_all_aliases().map(str::to_string));
        }
        Self { names }
    }

    /// The built-in commands of `dtctl`.
    #[must_use]
    pub fn for_cli() -> Self {
        Self::from_command(&Cli::command())
    }

    /// Returns `true` if `name` is a built-in command.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// All built-in names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl CommandRegistry for BuiltinCommands {
    fn is_builtin(&self, name: &str) -> bool {
        self.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_top_level_commands_and_help() {
        let builtins = BuiltinCommands::for_cli();
        let names: Vec<&str> = builtins.names().collect();
        assert_eq!(names, vec!["alias", "auth", "config", "help"]);
    }

    #[test]
    fn includes_subcommand_aliases() {
        let command = clap::Command::new("t")
            .subcommand(clap::Command::new("get").visible_alias("g").alias("fetch"));
        let builtins = BuiltinCommands::from_command(&command);
        assert!(builtins.contains("get"));
        assert!(builtins.contains("g"));
        assert!(builtins.contains("fetch"));
        assert!(!builtins.contains("wf"));
    }
}
