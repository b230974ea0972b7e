//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, saving or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed.
    #[error("failed to access config file '{}': {source}", .path.display())]
    Io {
        /// The file that could not be accessed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The named context does not exist.
    #[error("context not found: {name}")]
    ContextNotFound {
        /// The missing context name.
        name: String,
    },

    /// No context was named and none is current.
    #[error("no current context set (use 'dtctl config use-context <name>')")]
    NoCurrentContext,

    /// No platform configuration directory could be determined.
    #[error("cannot determine config directory; set $DTCTL_CONFIG")]
    NoConfigDir,
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_not_found_display() {
        let err = ConfigError::ContextNotFound {
            name: "prod".to_string(),
        };
        assert_eq!(err.to_string(), "context not found: prod");
    }

    #[test]
    fn io_error_names_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/tmp/dtctl/config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to access config file '/tmp/dtctl/config.yaml': denied"
        );
    }
}
