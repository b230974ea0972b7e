//! Error types for alias definition and resolution.

use std::fmt;

use thiserror::Error;

/// What an alias name collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// A command built into the CLI.
    BuiltinCommand,
    /// An alias that already exists with a different expansion.
    ExistingAlias,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltinCommand => write!(f, "built-in command"),
            Self::ExistingAlias => write!(f, "existing alias"),
        }
    }
}

/// Errors raised while defining or resolving aliases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    /// The expansion references `$N` but fewer than N arguments were supplied.
    #[error("alias '{name}' requires {required} argument(s) ($1..${required}), got {given}")]
    ArgumentShortfall {
        /// The alias name.
        name: String,
        /// Highest positional index referenced by the expansion.
        required: usize,
        /// Number of arguments supplied after the alias name.
        given: usize,
    },

    /// The alias name shadows a built-in command or another alias.
    #[error("alias name '{name}' conflicts with {kind} '{name}'")]
    NameCollision {
        /// The rejected name.
        name: String,
        /// What the name collided with.
        kind: CollisionKind,
    },

    /// The alias name is not usable as a first argument.
    #[error("invalid alias name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// The alias expansion is blank.
    #[error("alias '{name}' has an empty expansion")]
    EmptyExpansion {
        /// The alias name.
        name: String,
    },

    /// No alias with this name exists.
    #[error("alias not found: {name}")]
    NotFound {
        /// The missing alias name.
        name: String,
    },
}

/// Result type alias for alias operations.
pub type Result<T> = std::result::Result<T, AliasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_names_alias_and_counts() {
        let err = AliasError::ArgumentShortfall {
            name: "wfget".to_string(),
            required: 2,
            given: 1,
        };
        assert_eq!(
            err.to_string(),
            "alias 'wfget' requires 2 argument(s) ($1..$2), got 1"
        );
    }

    #[test]
    fn collision_names_kind() {
        let err = AliasError::NameCollision {
            name: "config".to_string(),
            kind: CollisionKind::BuiltinCommand,
        };
        assert_eq!(
            err.to_string(),
            "alias name 'config' conflicts with built-in command 'config'"
        );
    }

    #[test]
    fn not_found_display() {
        let err = AliasError::NotFound {
            name: "wf".to_string(),
        };
        assert_eq!(err.to_string(), "alias not found: wf");
    }
}
