//! # dtctl-cli
//!
//! The `dtctl` command-line interface.
//!
//! Provides commands for:
//! - Alias management (`dtctl alias set|list|delete|import|export`)
//! - Context management (`dtctl config ...`)
//! - Safety checks (`dtctl auth can-i`)
//!
//! # Architecture
//!
//! Aliases are expanded on the raw argument vector before clap sees it, so
//! an alias can expand into any subcommand tree:
//!
//! ```text
//! argv ─► expand_args ─┬─► Dispatch::Argv ─► Cli::parse_from ─► commands::run
//!                      └─► Dispatch::Shell ─► sh -c
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtin;
pub mod cli;
pub mod commands;
pub mod error;
pub mod expand;
pub mod output;
pub mod shell;

pub use builtin::BuiltinCommands;
pub use cli::{AliasCommands, AuthCommands, Cli, Commands, ConfigCommands, Format};
pub use error::CliError;
pub use expand::{Dispatch, expand_args};
pub use output::OutputFormat;

/// Program name used as `argv[0]` when re-parsing expanded arguments.
pub const BIN_NAME: &str = "dtctl";
