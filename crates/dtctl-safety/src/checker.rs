//! The safety checker consulted before mutating API calls.

use tracing::{debug, warn};

use crate::error::{Result, SafetyError};
use crate::ownership::{IdentityProvider, OwnedResource, ownership_of};
use crate::types::{Operation, Ownership, SafetyLevel};

/// Decides whether an operation may proceed in a context.
///
/// The decision is a pure function of the configured level, the operation
/// and the ownership of the target. An override can raise the effective
/// level for one invocation; it never lowers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyChecker {
    context: String,
    level: SafetyLevel,
    override_level: Option<SafetyLevel>,
}

impl SafetyChecker {
    /// Creates a checker for `context` at the configured `level`.
    #[must_use]
    pub fn new(context: impl Into<String>, level: SafetyLevel) -> Self {
        Self {
            context: context.into(),
            level,
            override_level: None,
        }
    }

    /// Sets the per-invocation override level.
    #[must_use]
    pub fn with_override(mut self, level: Option<SafetyLevel>) -> Self {
        self.override_level = level;
        self
    }

    /// Name of the context this checker was built for.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The context's configured level.
    #[must_use]
    pub const fn level(&self) -> SafetyLevel {
        self.level
    }

    /// The override level, if one was supplied.
    #[must_use]
    pub const fn override_level(&self) -> Option<SafetyLevel> {
        self.override_level
    }

    /// The level decisions are made against.
    #[must_use]
    pub fn effective_level(&self) -> SafetyLevel {
        self.override_level
            .map_or(self.level, |o| o.max(self.level))
    }

    /// Returns `true` if the operation is allowed at the effective level.
    #[must_use]
    pub fn permits(&self, operation: Operation, ownership: Ownership) -> bool {
        self.effective_level().permits(operation, ownership)
    }

    /// Returns `true` if the operation is allowed only because of the override.
    ///
    /// Callers use this to warn the user that a safety check was bypassed.
    #[must_use]
    pub fn is_overridden(&self, operation: Operation, ownership: Ownership) -> bool {
        !self.level.permits(operation, ownership) && self.permits(operation, ownership)
    }

    /// Checks whether `operation` may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::Denied`] naming the context, its configured
    /// level and the level that would permit the operation.
    pub fn check(&self, operation: Operation, ownership: Ownership) -> Result<()> {
        let required = operation.required_level(ownership);

        if self.permits(operation, ownership) {
            if self.is_overridden(operation, ownership) {
                warn!(
                    context = %self.context,
                    %operation,
                    level = %self.level,
                    effective = %self.effective_level(),
                    "safety level overridden"
                );
            } else {
                debug!(context = %self.context, %operation, %ownership, "operation allowed");
            }
            return Ok(());
        }

        debug!(
            context = %self.context,
            %operation,
            %ownership,
            level = %self.level,
            %required,
            "operation denied"
        );
        Err(SafetyError::Denied {
            operation,
            context: self.context.clone(),
            level: self.level,
            ownership: operation.is_ownership_gated().then_some(ownership),
            required,
        })
    }

    /// Checks an operation on a resource, resolving ownership only when the
    /// decision depends on it.
    ///
    /// Returns the ownership used for the decision.
    ///
    /// # Errors
    ///
    /// Returns [`SafetyError::Denied`] if the operation is not permitted.
    pub fn check_resource<R, I>(
        &self,
        operation: Operation,
        resource: &R,
        identity: &I,
    ) -> Result<Ownership>
    where
        R: OwnedResource + ?Sized,
        I: IdentityProvider + ?Sized,
    {
        let ownership = if operation.is_ownership_gated() {
            ownership_of(resource, identity)
        } else {
            Ownership::Unknown
        };
        self.check(operation, ownership)?;
        Ok(ownership)
    }
}
