//! # dtctl-config
//!
//! The dtctl configuration document.
//!
//! The document is YAML. This crate models the parts the command layer
//! needs (contexts with their safety levels, the current context, and the
//! alias table) and carries every other key through load/save untouched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;

pub use config::{CONFIG_ENV, Config, Context, ContextUpdate, NO_CONTEXT};
pub use error::{ConfigError, Result};
