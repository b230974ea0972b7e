//! Core types for safety checks.
//!
//! - [`SafetyLevel`]: per-context policy, ordered least to most permissive
//! - [`Operation`]: classification of the API call about to be made
//! - [`Ownership`]: relation of the target resource to the current user

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SafetyError;

/// How permissive mutating operations are in a context.
///
/// Variants are declared in ascending order, so `Ord` ranks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyLevel {
    /// Reads only.
    Readonly,
    /// Create anything, modify only resources owned by the current user.
    ReadwriteMine,
    /// Create and modify any resource, but never delete buckets.
    #[default]
    ReadwriteAll,
    /// No restrictions.
    DangerouslyUnrestricted,
}

impl SafetyLevel {
    /// Returns all levels, least permissive first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Readonly,
            Self::ReadwriteMine,
            Self::ReadwriteAll,
            Self::DangerouslyUnrestricted,
        ]
    }

    /// The configuration name of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Readonly => "readonly",
            Self::ReadwriteMine => "readwrite-mine",
            Self::ReadwriteAll => "readwrite-all",
            Self::DangerouslyUnrestricted => "dangerously-unrestricted",
        }
    }

    /// Returns `true` if this level permits `operation` on a resource with
    /// the given ownership.
    #[must_use]
    pub fn permits(self, operation: Operation, ownership: Ownership) -> bool {
        self >= operation.required_level(ownership)
    }
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyLevel {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "readonly" => Ok(Self::Readonly),
            "readwrite-mine" => Ok(Self::ReadwriteMine),
            "readwrite-all" => Ok(Self::ReadwriteAll),
            "dangerously-unrestricted" => Ok(Self::DangerouslyUnrestricted),
            _ => Err(SafetyError::InvalidLevel {
                value: s.to_string(),
            }),
        }
    }
}

/// The kind of API call a command is about to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Fetch or list.
    Read,
    /// Create a new resource.
    Create,
    /// Modify an existing resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Delete a storage bucket and the data retained in it.
    DeleteBucket,
}

impl Operation {
    /// Returns all operations.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Read,
            Self::Create,
            Self::Update,
            Self::Delete,
            Self::DeleteBucket,
        ]
    }

    /// The command-line name of this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::DeleteBucket => "delete-bucket",
        }
    }

    /// Returns `true` if the decision depends on who owns the resource.
    #[must_use]
    pub const fn is_ownership_gated(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// The least permissive level that allows this operation.
    ///
    /// Unknown ownership is treated as shared.
    #[must_use]
    pub const fn required_level(self, ownership: Ownership) -> SafetyLevel {
        match self {
            Self::Read => SafetyLevel::Readonly,
            Self::Create => SafetyLevel::ReadwriteMine,
            Self::Update | Self::Delete => match ownership {
                Ownership::Own => SafetyLevel::ReadwriteMine,
                Ownership::Shared | Ownership::Unknown => SafetyLevel::ReadwriteAll,
            },
            Self::DeleteBucket => SafetyLevel::DangerouslyUnrestricted,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "delete-bucket" => Ok(Self::DeleteBucket),
            _ => Err(SafetyError::InvalidOperation {
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the target resource belongs to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ownership {
    /// Owned by the current user.
    Own,
    /// Owned by someone else.
    Shared,
    /// Owner could not be determined.
    #[default]
    Unknown,
}

impl Ownership {
    /// Classifies a resource from its recorded owner and the current user.
    ///
    /// Anything short of two known, equal identities is not [`Ownership::Own`].
    #[must_use]
    pub fn determine(owner: Option<&str>, current_user: Option<&str>) -> Self {
        match (owner, current_user) {
            (Some(owner), Some(user)) if !owner.is_empty() && !user.is_empty() => {
                if owner == user {
                    Self::Own
                } else {
                    Self::Shared
                }
            }
            _ => Self::Unknown,
        }
    }

    /// The command-line name of this ownership class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Shared => "shared",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ownership {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "own" => Ok(Self::Own),
            "shared" => Ok(Self::Shared),
            "unknown" => Ok(Self::Unknown),
            _ => Err(SafetyError::InvalidOwnership {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    use Operation::{Create, Delete, DeleteBucket, Read, Update};
    use Ownership::{Own, Shared, Unknown};
    use SafetyLevel::{DangerouslyUnrestricted, Readonly, ReadwriteAll, ReadwriteMine};

    #[test_case(Readonly, Read, Own, true)]
    #[test_case(Readonly, Create, Own, false)]
    #[test_case(Readonly, Update, Own, false)]
    #[test_case(Readonly, Delete, Own, false)]
    #[test_case(Readonly, Delete, Shared, false)]
    #[test_case(Readonly, Delete, Unknown, false)]
    #[test_case(Readonly, DeleteBucket, Own, false)]
    #[test_case(ReadwriteMine, Read, Shared, true)]
    #[test_case(ReadwriteMine, Create, Unknown, true)]
    #[test_case(ReadwriteMine, Update, Own, true)]
    #[test_case(ReadwriteMine, Delete, Own, true)]
    #[test_case(ReadwriteMine, Update, Shared, false)]
    #[test_case(ReadwriteMine, Delete, Shared, false)]
    #[test_case(ReadwriteMine, Update, Unknown, false)]
    #[test_case(ReadwriteMine, Delete, Unknown, false)]
    #[test_case(ReadwriteMine, DeleteBucket, Own, false)]
    #[test_case(ReadwriteAll, Read, Unknown, true)]
    #[test_case(ReadwriteAll, Create, Shared, true)]
    #[test_case(ReadwriteAll, Update, Own, true)]
    #[test_case(ReadwriteAll, Update, Shared, true)]
    #[test_case(ReadwriteAll, Delete, Unknown, true)]
    #[test_case(ReadwriteAll, DeleteBucket, Own, false)]
    #[test_case(DangerouslyUnrestricted, Delete, Shared, true)]
    #[test_case(DangerouslyUnrestricted, DeleteBucket, Unknown, true)]
    #[test_case(DangerouslyUnrestricted, DeleteBucket, Own, true)]
    fn decision_table(level: SafetyLevel, op: Operation, ownership: Ownership, allowed: bool) {
        assert_eq!(level.permits(op, ownership), allowed);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Readonly < ReadwriteMine);
        assert!(ReadwriteMine < ReadwriteAll);
        assert!(ReadwriteAll < DangerouslyUnrestricted);
        let mut sorted = SafetyLevel::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, SafetyLevel::all());
    }

    #[test]
    fn default_level_is_readwrite_all() {
        assert_eq!(SafetyLevel::default(), ReadwriteAll);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for level in SafetyLevel::all() {
            assert_eq!(level.to_string().parse::<SafetyLevel>(), Ok(*level));
        }
        for op in Operation::all() {
            assert_eq!(op.to_string().parse::<Operation>(), Ok(*op));
        }
        assert_eq!("SHARED".parse::<Ownership>(), Ok(Shared));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!(matches!(
            "admin".parse::<SafetyLevel>(),
            Err(SafetyError::InvalidLevel { .. })
        ));
        assert!(matches!(
            "purge".parse::<Operation>(),
            Err(SafetyError::InvalidOperation { .. })
        ));
        assert!(matches!(
            "mine".parse::<Ownership>(),
            Err(SafetyError::InvalidOwnership { .. })
        ));
    }

    #[test_case(Some("u-1"), Some("u-1"), Own ; "same user")]
    #[test_case(Some("u-1"), Some("u-2"), Shared ; "different user")]
    #[test_case(None, Some("u-1"), Unknown ; "owner missing")]
    #[test_case(Some("u-1"), None, Unknown ; "identity lookup failed")]
    #[test_case(Some(""), Some(""), Unknown ; "blank identities")]
    fn ownership_determination(owner: Option<&str>, user: Option<&str>, expected: Ownership) {
        assert_eq!(Ownership::determine(owner, user), expected);
    }

    #[test]
    fn only_update_and_delete_are_ownership_gated() {
        let gated: Vec<Operation> = Operation::all()
            .iter()
            .copied()
            .filter(|op| op.is_ownership_gated())
            .collect();
        assert_eq!(gated, vec![Update, Delete]);
    }
}
