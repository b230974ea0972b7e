//! # dtctl-safety
//!
//! Local authorization of mutating operations.
//!
//! Each dtctl context carries a [`SafetyLevel`]. Before a command performs an
//! API call it asks a [`SafetyChecker`] whether the [`Operation`] is allowed
//! on a resource of the given [`Ownership`]:
//!
//! | level                      | read | create | update/delete own | shared / unknown | delete-bucket |
//! |----------------------------|------|--------|-------------------|------------------|---------------|
//! | `readonly`                 | ✓    |        |                   |                  |               |
//! | `readwrite-mine`           | ✓    | ✓      | ✓                 |                  |               |
//! | `readwrite-all`            | ✓    | ✓      | ✓                 | ✓                |               |
//! | `dangerously-unrestricted` | ✓    | ✓      | ✓                 | ✓                | ✓             |
//!
//! Every cell reduces to `level >= operation.required_level(ownership)`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod checker;
pub mod error;
pub mod ownership;
pub mod types;

pub use checker::SafetyChecker;
pub use error::{Result, SafetyError};
pub use ownership::{IdentityProvider, OwnedResource, StaticIdentity, ownership_of};
pub use types::{Operation, Ownership, SafetyLevel};
