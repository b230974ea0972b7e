//! Safety check command implementation.

use std::io::Write;

use dtctl_config::Config;
use dtctl_safety::{Operation, Ownership, SafetyLevel, ownership_of};

use crate::cli::AuthCommands;
use crate::error::CliError;
use crate::output::{CanIResult, OutputFormat};

/// Handler for auth subcommands.
pub struct AuthCommand<'a> {
    config: &'a Config,
    context: Option<&'a str>,
    override_level: Option<SafetyLevel>,
}

impl<'a> AuthCommand<'a> {
    /// Creates a new auth command handler.
    #[must_use]
    pub const fn new(
        config: &'a Config,
        context: Option<&'a str>,
        override_level: Option<SafetyLevel>,
    ) -> Self {
        Self {
            config,
            context,
            override_level,
        }
    }

    /// Executes the auth subcommand.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Safety`] when the operation is denied.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AuthCommands,
    ) -> Result<(), CliError> {
        match command {
            AuthCommands::CanI {
                operation,
                ownership,
                owner,
            } => self.can_i(
                out,
                format,
                (*operation).into(),
                ownership.map(Into::into),
                owner.as_deref(),
            ),
        }
    }

    fn can_i<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        operation: Operation,
        ownership: Option<Ownership>,
        owner: Option<&str>,
    ) -> Result<(), CliError> {
        let checker = self
            .config
            .safety_checker(self.context)?
            .with_override(self.override_level);

        let ownership = match (ownership, owner) {
            (Some(ownership), _) => ownership,
            (None, Some(owner)) if operation.is_ownership_gated() => {
                let identity = self
                    .config
                    .resolve_context(self.context)
                    .map(dtctl_config::Context::identity)
                    .unwrap_or_default();
                ownership_of(owner, &identity)
            }
            _ => Ownership::Unknown,
        };

        checker.check(operation, ownership)?;

        let overridden = checker.is_overridden(operation, ownership);
        if overridden {
            eprintln!(
                "Warning: {operation} allowed only because the safety level of context '{}' is overridden to '{}'",
                checker.context(),
                checker.effective_level()
            );
        }

        format.write(
            out,
            &CanIResult {
                allowed: true,
                operation: operation.to_string(),
                ownership: ownership.to_string(),
                context: checker.context().to_string(),
                safety_level: checker.level().to_string(),
                effective_level: checker.effective_level().to_string(),
                overridden,
            },
        )?;
        Ok(())
    }
}
