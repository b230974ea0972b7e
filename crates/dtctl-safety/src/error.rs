//! Error types for safety checks.

use thiserror::Error;

use crate::types::{Operation, Ownership, SafetyLevel};

/// Errors raised by the safety subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SafetyError {
    /// The context's safety level does not permit the operation.
    #[error(
        "{operation} denied: context '{context}' has safety level '{level}'{}; \
         requires safety level '{required}' or higher",
        ownership_note(.ownership)
    )]
    Denied {
        /// The operation that was attempted.
        operation: Operation,
        /// Name of the active context.
        context: String,
        /// The context's configured safety level.
        level: SafetyLevel,
        /// Ownership of the target, for ownership-gated operations.
        ownership: Option<Ownership>,
        /// The lowest level that would permit the operation.
        required: SafetyLevel,
    },

    /// Unrecognized safety level name.
    #[error("invalid safety level '{value}' (expected one of: readonly, readwrite-mine, readwrite-all, dangerously-unrestricted)")]
    InvalidLevel {
        /// The rejected input.
        value: String,
    },

    /// Unrecognized operation name.
    #[error("invalid operation '{value}' (expected one of: read, create, update, delete, delete-bucket)")]
    InvalidOperation {
        /// The rejected input.
        value: String,
    },

    /// Unrecognized ownership name.
    #[error("invalid ownership '{value}' (expected one of: own, shared, unknown)")]
    InvalidOwnership {
        /// The rejected input.
        value: String,
    },
}

fn ownership_note(ownership: &Option<Ownership>) -> String {
    match ownership {
        Some(Ownership::Own) => " and the resource is owned by you".to_string(),
        Some(Ownership::Shared) => " and the resource is owned by another user".to_string(),
        Some(Ownership::Unknown) => {
            " and the resource owner could not be determined".to_string()
        }
        None => String::new(),
    }
}

/// Result type alias for safety operations.
pub type Result<T> = std::result::Result<T, SafetyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_names_context_level_and_required() {
        let err = SafetyError::Denied {
            operation: Operation::DeleteBucket,
            context: "prod".to_string(),
            level: SafetyLevel::ReadwriteAll,
            ownership: None,
            required: SafetyLevel::DangerouslyUnrestricted,
        };
        assert_eq!(
            err.to_string(),
            "delete-bucket denied: context 'prod' has safety level 'readwrite-all'; \
             requires safety level 'dangerously-unrestricted' or higher"
        );
    }

    #[test]
    fn denied_mentions_ownership() {
        let err = SafetyError::Denied {
            operation: Operation::Update,
            context: "staging".to_string(),
            level: SafetyLevel::ReadwriteMine,
            ownership: Some(Ownership::Shared),
            required: SafetyLevel::ReadwriteAll,
        };
        let msg = err.to_string();
        assert!(msg.contains("staging"));
        assert!(msg.contains("readwrite-mine"));
        assert!(msg.contains("owned by another user"));
        assert!(msg.contains("'readwrite-all' or higher"));
    }

    #[test]
    fn invalid_level_display() {
        let err = SafetyError::InvalidLevel {
            value: "yolo".to_string(),
        };
        assert!(err.to_string().starts_with("invalid safety level 'yolo'"));
    }
}
