//! CLI error types.

use std::path::PathBuf;

use dtctl_alias::AliasError;
use dtctl_config::ConfigError;
use dtctl_safety::SafetyError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Alias definition or expansion failed.
    #[error(transparent)]
    Alias(#[from] AliasError),
    /// The safety level denied an operation.
    #[error(transparent)]
    Safety(#[from] SafetyError),
    /// Configuration could not be loaded, saved or edited.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The shell for a shell alias could not be started.
    #[error("failed to run shell alias '{command}': {source}")]
    Shell {
        /// The shell command line.
        command: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An input file could not be read or written.
    #[error("failed to access '{}': {source}", .path.display())]
    File {
        /// The file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An alias file is not a `name: expansion` mapping.
    #[error("invalid alias file '{}': {source}", .path.display())]
    AliasFile {
        /// The file.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
