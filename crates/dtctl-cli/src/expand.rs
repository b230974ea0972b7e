//! Alias expansion ahead of argument parsing.

use dtctl_alias::{AliasTable, CommandRegistry, Expansion, resolve};
use tracing::{debug, warn};

use crate::error::CliError;

/// What to do with the process arguments after alias expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Parse these arguments as a normal command line.
    Argv(Vec<String>),
    /// Run this command line through the shell.
    Shell(String),
}

/// Expands the first argument if it names an alias.
///
/// A built-in command always wins over an alias of the same name. Such an
/// alias can only exist if the configuration file was edited by hand.
///
/// # Errors
///
/// Returns [`CliError::Alias`] if an argv alias is missing positional
/// arguments.
pub fn expand_args<R>(
    args: Vec<String>,
    aliases: &AliasTable,
    builtins: &R,
) -> Result<Dispatch, CliError>
where
    R: CommandRegistry + ?Sized,
{
    if let Some(first) = args.first().filter(|name| builtins.is_builtin(name)) {
        if aliases.contains(first) {
            warn!(alias = %first, "ignoring alias that shadows a built-in command");
        }
        return Ok(Dispatch::Argv(args));
    }

    match resolve(&args, Some(aliases))? {
        None => Ok(Dispatch::Argv(args)),
        Some(Expansion::Argv(argv)) => {
            debug!(?argv, "dispatching expanded alias");
            Ok(Dispatch::Argv(argv))
        }
        Some(Expansion::Shell(command)) => Ok(Dispatch::Shell(command)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuiltinCommands;
    use dtctl_alias::AliasError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    fn aliases(entries: &[(&str, &str)]) -> AliasTable {
        entries
            .iter()
            .map(|(n, e)| ((*n).to_string(), (*e).to_string()))
            .collect()
    }

    #[test]
    fn literal_commands_pass_through() {
        let table = aliases(&[("wf", "get workflows")]);
        let args = strings(&["config", "view"]);
        let dispatch = expand_args(args.clone(), &table, &BuiltinCommands::for_cli()).expect("expand");
        assert_eq!(dispatch, Dispatch::Argv(args));
    }

    #[test]
    fn argv_alias_is_expanded() {
        let table = aliases(&[("ctx", "config use-context $1")]);
        let dispatch = expand_args(strings(&["ctx", "prod"]), &table, &BuiltinCommands::for_cli())
            .expect("expand");
        assert_eq!(
            dispatch,
            Dispatch::Argv(strings(&["config", "use-context", "prod"]))
        );
    }

    #[test]
    fn shell_alias_is_dispatched_to_shell() {
        let table = aliases(&[("count", "!dtctl alias list -o json | jq length")]);
        let dispatch = expand_args(strings(&["count"]), &table, &BuiltinCommands::for_cli())
            .expect("expand");
        assert_eq!(
            dispatch,
            Dispatch::Shell("dtctl alias list -o json | jq length".to_string())
        );
    }

    #[test]
    fn hand_edited_shadowing_alias_is_ignored() {
        let table = aliases(&[("config", "!echo shadowed")]);
        let args = strings(&["config", "view"]);
        let dispatch = expand_args(args.clone(), &table, &BuiltinCommands::for_cli()).expect("expand");
        assert_eq!(dispatch, Dispatch::Argv(args));
    }

    #[test]
    fn shortfall_is_reported() {
        let table = aliases(&[("ctx", "config use-context $1")]);
        let err = expand_args(strings(&["ctx"]), &table, &BuiltinCommands::for_cli()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Alias(AliasError::ArgumentShortfall { required: 1, given: 0, .. })
        ));
    }
}
