//! Output formatting for CLI commands.
//!
//! Supports table (human-readable), JSON and YAML output formats.

use std::io::Write;

use dtctl_alias::Alias;
use dtctl_config::Config;
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles table, JSON and YAML output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Yaml => {
                serde_yaml::to_writer(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("YAML serialization failed: {e}")))?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Acknowledgement of a configuration change.
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    /// Whether the change was applied.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl StatusMessage {
    /// A successful change.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl TableDisplay for StatusMessage {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}

/// Aliases for listing.
#[derive(Debug, Clone, Serialize)]
pub struct AliasList {
    /// Aliases in name order.
    pub aliases: Vec<Alias>,
}

impl TableDisplay for AliasList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.aliases.is_empty() {
            writeln!(writer, "No aliases defined")?;
            return Ok(());
        }

        let width = self
            .aliases
            .iter()
            .map(|a| a.name.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(4, 24);

        writeln!(writer, "{:<width$}  EXPANSION", "NAME")?;
        for alias in &self.aliases {
            writeln!(
                writer,
                "{:<width$}  {}",
                truncate(&alias.name, width),
                alias.expansion
            )?;
        }
        Ok(())
    }
}

/// A context row for listing.
#[derive(Debug, Clone, Serialize)]
pub struct ContextInfo {
    /// Context name.
    pub name: String,
    /// Environment URL.
    pub environment: Option<String>,
    /// Effective safety level.
    pub safety_level: String,
    /// Whether this is the current context.
    pub current: bool,
}

/// Contexts for listing.
#[derive(Debug, Clone, Serialize)]
pub struct ContextList {
    /// Known contexts in configuration order.
    pub contexts: Vec<ContextInfo>,
}

impl ContextList {
    /// Builds the listing from a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let current = config.current_context.as_deref();
        Self {
            contexts: config
                .contexts
                .iter()
                .map(|c| ContextInfo {
                    name: c.name.clone(),
                    environment: c.environment.clone(),
                    safety_level: c.safety_level().to_string(),
                    current: current == Some(c.name.as_str()),
                })
                .collect(),
        }
    }
}

impl TableDisplay for ContextList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.contexts.is_empty() {
            writeln!(writer, "No contexts configured")?;
            return Ok(());
        }

        writeln!(
            writer,
            "{:<7}  {:<20}  {:<24}  ENVIRONMENT",
            "CURRENT", "NAME", "SAFETY LEVEL"
        )?;
        for ctx in &self.contexts {
            writeln!(
                writer,
                "{:<7}  {:<20}  {:<24}  {}",
                if ctx.current { "*" } else { "" },
                truncate(&ctx.name, 20),
                ctx.safety_level,
                ctx.environment.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

/// The current context name.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentContext {
    /// Context name.
    pub name: String,
}

impl TableDisplay for CurrentContext {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.name)?;
        Ok(())
    }
}

/// The whole configuration document.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ConfigView<'a> {
    /// The configuration.
    pub config: &'a Config,
}

impl TableDisplay for ConfigView<'_> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let yaml = self.config.to_yaml()?;
        write!(writer, "{yaml}")?;
        Ok(())
    }
}

/// Result of a safety check.
#[derive(Debug, Clone, Serialize)]
pub struct CanIResult {
    /// Whether the operation is allowed.
    pub allowed: bool,
    /// The operation checked.
    pub operation: String,
    /// Ownership the decision was made for.
    pub ownership: String,
    /// Context name.
    pub context: String,
    /// Configured safety level.
    pub safety_level: String,
    /// Level the decision was made against.
    pub effective_level: String,
    /// Whether the decision only passed because of an override.
    pub overridden: bool,
}

impl TableDisplay for CanIResult {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.allowed {
            writeln!(writer, "yes")?;
        } else {
            writeln!(writer, "no")?;
        }
        Ok(())
    }
}

/// Truncate a string to a maximum number of characters, marking the cut with `…`.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
