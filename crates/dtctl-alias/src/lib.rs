//! # dtctl-alias
//!
//! User-defined command shorthands for `dtctl`.
//!
//! An alias maps a name to an expansion. Expansions come in two forms:
//! - **argv aliases** (`wf: get workflows`) are tokenized and re-dispatched
//!   as normal arguments, with `$1`..`$9` replaced by the arguments typed
//!   after the alias name.
//! - **shell aliases** (`count: "!dtctl get workflows -o json | jq length"`)
//!   are handed to a shell with any trailing arguments appended.
//!
//! Resolution runs once, on the raw argument vector, before any flag parsing:
//!
//! ```text
//! argv ──► resolve() ──┬─► None            (literal dispatch)
//!                      ├─► Expansion::Argv  (re-dispatch)
//!                      └─► Expansion::Shell (sh -c)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod params;
pub mod resolver;
pub mod table;
pub mod tokenize;

pub use error::{AliasError, CollisionKind, Result};
pub use params::substitute_params;
pub use resolver::{Expansion, SHELL_PREFIX, resolve};
pub use table::{Alias, AliasTable, CommandRegistry};
pub use tokenize::split_command;
