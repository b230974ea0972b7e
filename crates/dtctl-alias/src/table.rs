//! The alias table stored in the dtctl configuration.
//!
//! The table serializes as a plain `name: expansion` mapping so it can be
//! embedded in the configuration document and exchanged through
//! `alias import`/`alias export` files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AliasError, CollisionKind, Result};
use crate::resolver::SHELL_PREFIX;

/// Answers whether a name is taken by a built-in command.
///
/// Implemented for any `Fn(&str) -> bool`, so tests can pass a closure.
pub trait CommandRegistry {
    /// Returns `true` if `name` is a built-in command name.
    fn is_builtin(&self, name: &str) -> bool;
}

impl<F> CommandRegistry for F
where
    F: Fn(&str) -> bool,
{
    fn is_builtin(&self, name: &str) -> bool {
        self(name)
    }
}

/// A single alias definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Name typed as the first argument.
    pub name: String,
    /// Expansion template.
    pub expansion: String,
}

/// Name-ordered mapping of alias names to expansions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the expansion for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns `true` if an alias named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no aliases are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All aliases in name order.
    #[must_use]
    pub fn list(&self) -> Vec<Alias> {
        self.entries
            .iter()
            .map(|(name, expansion)| Alias {
                name: name.clone(),
                expansion: expansion.clone(),
            })
            .collect()
    }

    /// Creates or replaces an alias.
    ///
    /// Returns the previous expansion when an existing alias was replaced.
    /// The table is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::NameCollision`] if `name` is a built-in command,
    /// [`AliasError::InvalidName`] or [`AliasError::EmptyExpansion`] if the
    /// definition is malformed.
    pub fn set<R>(&mut self, name: &str, expansion: &str, registry: &R) -> Result<Option<String>>
    where
        R: CommandRegistry + ?Sized,
    {
        validate_entry(name, expansion, registry)?;
        let previous = self
            .entries
            .insert(name.to_string(), expansion.to_string());
        debug!(alias = name, replaced = previous.is_some(), "alias set");
        Ok(previous)
    }

    /// Removes an alias, returning its expansion.
    ///
    /// # Errors
    ///
    /// Returns [`AliasError::NotFound`] if no alias has this name.
    pub fn delete(&mut self, name: &str) -> Result<String> {
        let expansion = self.entries.remove(name).ok_or_else(|| AliasError::NotFound {
            name: name.to_string(),
        })?;
        debug!(alias = name, "alias deleted");
        Ok(expansion)
    }

    /// Merges every alias from `incoming` into this table.
    ///
    /// All entries are validated before any is written, so a rejected
    /// import leaves the table unchanged. Entries identical to an existing
    /// alias are not collisions. Returns the number of aliases imported.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, or [`AliasError::NameCollision`]
    /// with [`CollisionKind::ExistingAlias`] when `overwrite` is false and an
    /// incoming name already maps to a different expansion.
    pub fn import<R>(&mut self, incoming: &Self, overwrite: bool, registry: &R) -> Result<usize>
    where
        R: CommandRegistry + ?Sized,
    {
        for (name, expansion) in &incoming.entries {
            validate_entry(name, expansion, registry)?;
            let conflicts = self.get(name).is_some_and(|current| current != expansion);
            if conflicts && !overwrite {
                return Err(AliasError::NameCollision {
                    name: name.clone(),
                    kind: CollisionKind::ExistingAlias,
                });
            }
        }

        self.entries.extend(
            incoming
                .entries
                .iter()
                .map(|(name, expansion)| (name.clone(), expansion.clone())),
        );
        debug!(count = incoming.len(), overwrite, "aliases imported");
        Ok(incoming.len())
    }
}

impl FromIterator<(String, String)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn validate_entry<R>(name: &str, expansion: &str, registry: &R) -> Result<()>
where
    R: CommandRegistry + ?Sized,
{
    let invalid = |reason: &str| AliasError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name cannot contain whitespace"));
    }
    // Resolution never looks at flag-like first arguments.
    if name.starts_with('-') {
        return Err(invalid("name cannot start with '-'"));
    }
    if name.starts_with(SHELL_PREFIX) {
        return Err(invalid("name cannot start with '!'"));
    }
    if expansion.trim().is_empty() {
        return Err(AliasError::EmptyExpansion {
            name: name.to_string(),
        });
    }
    if registry.is_builtin(name) {
        return Err(AliasError::NameCollision {
            name: name.to_string(),
            kind: CollisionKind::BuiltinCommand,
        });
    }
    Ok(())
}
