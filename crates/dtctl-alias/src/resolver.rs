//! Alias resolution on the raw argument vector.

use tracing::debug;

use crate::error::{AliasError, Result};
use crate::params::substitute_params;
use crate::table::AliasTable;
use crate::tokenize::split_command;

/// Marks an expansion as a shell command rather than an argv template.
pub const SHELL_PREFIX: char = '!';

/// The result of expanding an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// Rewritten arguments to re-enter normal command dispatch.
    Argv(Vec<String>),
    /// A command line to hand to the shell.
    Shell(String),
}

impl Expansion {
    /// Returns `true` for shell aliases.
    #[must_use]
    pub const fn is_shell(&self) -> bool {
        matches!(self, Self::Shell(_))
    }
}

/// Expands `args[0]` if it names an alias in `table`.
///
/// Returns `Ok(None)` when there is nothing to expand: empty `args`, no
/// table, a flag-like first argument, or an unknown name. The caller then
/// dispatches `args` literally.
///
/// # Errors
///
/// Returns [`AliasError::ArgumentShortfall`] when an argv alias references
/// `$N` and fewer than N arguments follow the alias name.
///
/// ```
/// use dtctl_alias::{AliasTable, Expansion, resolve};
///
/// let table: AliasTable = [("wfget".to_string(), "get workflow $1".to_string())]
///     .into_iter()
///     .collect();
/// let args = vec!["wfget".to_string(), "abc".to_string()];
///
/// let expansion = resolve(&args, Some(&table)).unwrap();
/// assert_eq!(
///     expansion,
///     Some(Expansion::Argv(vec!["get".into(), "workflow".into(), "abc".into()]))
/// );
/// ```
pub fn resolve(args: &[String], table: Option<&AliasTable>) -> Result<Option<Expansion>> {
    let Some(table) = table else {
        return Ok(None);
    };
    let Some((name, rest)) = args.split_first() else {
        return Ok(None);
    };
    if name.starts_with('-') {
        return Ok(None);
    }
    let Some(template) = table.get(name) else {
        return Ok(None);
    };

    let expansion = match template.strip_prefix(SHELL_PREFIX) {
        Some(command) => Expansion::Shell(expand_shell(command, rest)),
        None => Expansion::Argv(expand_argv(name, template, rest)?),
    };
    debug!(alias = %name, shell = expansion.is_shell(), "expanded alias");
    Ok(Some(expansion))
}

/// Appends trailing arguments to a shell command, space separated.
///
/// Arguments are not quoted; shell-level escaping is the caller's concern.
fn expand_shell(command: &str, rest: &[String]) -> String {
    if rest.is_empty() {
        command.to_string()
    } else {
        format!("{command} {}", rest.join(" "))
    }
}

fn expand_argv(name: &str, template: &str, rest: &[String]) -> Result<Vec<String>> {
    let mut max_used = 0;
    let mut argv: Vec<String> = split_command(template)
        .iter()
        .map(|token| substitute_params(token, rest, &mut max_used))
        .collect();

    if max_used > rest.len() {
        return Err(AliasError::ArgumentShortfall {
            name: name.to_string(),
            required: max_used,
            given: rest.len(),
        });
    }

    argv.extend(rest.iter().skip(max_used).cloned());
    Ok(argv)
}
