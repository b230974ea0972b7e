//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dtctl_safety::{Operation, Ownership, SafetyLevel};

/// dtctl - manage observability platform configuration from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "dtctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Context to use instead of the current context.
    #[arg(long, global = true, env = "DTCTL_CONTEXT")]
    pub context: Option<String>,

    /// Output format.
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        env = "DTCTL_OUTPUT",
        default_value_t = Format::Table
    )]
    pub output: Format,

    /// Raise the safety level for this invocation only.
    #[arg(long, global = true, value_enum, env = "DTCTL_OVERRIDE_SAFETY")]
    pub override_safety: Option<SafetyLevelArg>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
    /// YAML output.
    Yaml,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage command aliases.
    Alias {
        /// Alias subcommand to execute.
        #[command(subcommand)]
        command: AliasCommands,
    },

    /// Manage contexts and view the configuration.
    Config {
        /// Config subcommand to execute.
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect what the active context is allowed to do.
    Auth {
        /// Auth subcommand to execute.
        #[command(subcommand)]
        command: AuthCommands,
    },
}

/// Alias subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AliasCommands {
    /// Create or replace an alias.
    ///
    /// Use `$1`..`$9` for positional arguments. Prefix the expansion with
    /// `!` to run it through the shell, e.g. `'!dtctl get workflows | wc -l'`.
    Set {
        /// Alias name.
        name: String,

        /// Command line the alias expands to.
        #[arg(allow_hyphen_values = true)]
        expansion: String,
    },

    /// List all aliases.
    #[command(visible_alias = "ls")]
    List,

    /// Delete an alias.
    #[command(visible_alias = "rm")]
    Delete {
        /// Alias name.
        name: String,
    },

    /// Import aliases from a YAML file of `name: expansion` pairs.
    Import {
        /// File to read.
        file: PathBuf,

        /// Replace existing aliases with the same name.
        #[arg(long)]
        overwrite: bool,
    },

    /// Export aliases as YAML.
    Export {
        /// File to write; prints to stdout when omitted.
        file: Option<PathBuf>,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the configuration document.
    View,

    /// Show the current context name.
    CurrentContext,

    /// List contexts.
    GetContexts,

    /// Switch the current context.
    UseContext {
        /// Context name.
        name: String,
    },

    /// Create or update a context.
    SetContext {
        /// Context name.
        name: String,

        /// Environment URL.
        #[arg(long)]
        environment: Option<String>,

        /// Safety level for mutating operations.
        #[arg(long, value_enum)]
        safety_level: Option<SafetyLevelArg>,

        /// User id this context authenticates as.
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Delete a context.
    DeleteContext {
        /// Context name.
        name: String,
    },
}

/// Auth subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommands {
    /// Check whether an operation is permitted by the context's safety level.
    CanI {
        /// Operation to check.
        #[arg(value_enum)]
        operation: OperationArg,

        /// Ownership of the target resource.
        #[arg(long, value_enum, conflicts_with = "owner")]
        ownership: Option<OwnershipArg>,

        /// Owner id of the target resource, compared with the context's user id.
        #[arg(long)]
        owner: Option<String>,
    },
}

/// Safety level argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SafetyLevelArg {
    /// Reads only.
    Readonly,
    /// Modify only your own resources.
    ReadwriteMine,
    /// Modify any resource; bucket deletion stays blocked.
    ReadwriteAll,
    /// No restrictions.
    DangerouslyUnrestricted,
}

impl From<SafetyLevelArg> for SafetyLevel {
    fn from(arg: SafetyLevelArg) -> Self {
        match arg {
            SafetyLevelArg::Readonly => Self::Readonly,
            SafetyLevelArg::ReadwriteMine => Self::ReadwriteMine,
            SafetyLevelArg::ReadwriteAll => Self::ReadwriteAll,
            SafetyLevelArg::DangerouslyUnrestricted => Self::DangerouslyUnrestricted,
        }
    }
}

/// Operation argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    /// Fetch or list.
    Read,
    /// Create a resource.
    Create,
    /// Modify a resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Delete a storage bucket.
    DeleteBucket,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Read => Self::Read,
            OperationArg::Create => Self::Create,
            OperationArg::Update => Self::Update,
            OperationArg::Delete => Self::Delete,
            OperationArg::DeleteBucket => Self::DeleteBucket,
        }
    }
}

/// Ownership argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OwnershipArg {
    /// Owned by you.
    Own,
    /// Owned by someone else.
    Shared,
    /// Owner unknown.
    Unknown,
}

impl From<OwnershipArg> for Ownership {
    fn from(arg: OwnershipArg) -> Self {
        match arg {
            OwnershipArg::Own => Self::Own,
            OwnershipArg::Shared => Self::Shared,
            OwnershipArg::Unknown => Self::Unknown,
        }
    }
}
