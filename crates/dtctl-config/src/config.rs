//! Loading, saving and editing the configuration document.
//!
//! ```yaml
//! current-context: prod
//! contexts:
//!   - name: prod
//!     environment: https://abc12345.apps.example.com
//!     safety-level: readwrite-mine
//!     user-id: 6f1d2c3e-0000-4000-8000-000000000001
//! aliases:
//!   wf: get workflows
//!   count: "!dtctl get workflows -o json | jq length"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dtctl_alias::AliasTable;
use dtctl_safety::{SafetyChecker, SafetyLevel, StaticIdentity};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "DTCTL_CONFIG";

/// Context name reported when no context is configured.
pub const NO_CONTEXT: &str = "<none>";

/// A named connection to a platform environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Context {
    /// Unique context name.
    pub name: String,
    /// Environment URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Configured safety level; unset means the default level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_level: Option<SafetyLevel>,
    /// Id of the user this context authenticates as, used for ownership checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Keys this crate does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Context {
    /// Creates a context with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The effective safety level of this context.
    #[must_use]
    pub fn safety_level(&self) -> SafetyLevel {
        self.safety_level.unwrap_or_default()
    }

    /// Identity provider answering with this context's user id.
    #[must_use]
    pub fn identity(&self) -> StaticIdentity {
        StaticIdentity::new(self.user_id.as_deref())
    }
}

/// Fields to change with [`Config::set_context`]; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    /// New environment URL.
    pub environment: Option<String>,
    /// New safety level.
    pub safety_level: Option<SafetyLevel>,
    /// New user id.
    pub user_id: Option<String>,
}

/// The configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Name of the active context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,
    /// Known contexts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<Context>,
    /// User-defined command aliases.
    #[serde(default, skip_serializing_if = "AliasTable::is_empty")]
    pub aliases: AliasTable,
    /// Keys this crate does not model.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    /// Location of the configuration file.
    ///
    /// `$DTCTL_CONFIG` wins; otherwise `dtctl/config.yaml` under the
    /// platform configuration directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if neither is available.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("dtctl").join("config.yaml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing or blank file yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            contexts = config.contexts.len(),
            aliases = config.aliases.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the document does not match the schema.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Serializes the configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Writes the configuration to `path`.
    ///
    /// Parent directories are created. The file is written next to its
    /// destination and renamed into place, so readers never see a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem step fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let content = self.to_yaml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }
        fs::rename(&tmp, path).map_err(io_err)?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// The active context, if one is set and exists.
    #[must_use]
    pub fn current(&self) -> Option<&Context> {
        self.current_context
            .as_deref()
            .and_then(|name| self.context(name))
    }

    /// Looks up a context by name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Resolves `name`, or the current context when `name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCurrentContext`] or
    /// [`ConfigError::ContextNotFound`].
    pub fn resolve_context(&self, name: Option<&str>) -> Result<&Context> {
        let name = name
            .or(self.current_context.as_deref())
            .ok_or(ConfigError::NoCurrentContext)?;
        self.context(name).ok_or_else(|| ConfigError::ContextNotFound {
            name: name.to_string(),
        })
    }

    /// Creates or updates a context. Returns `true` if it was created.
    pub fn set_context(&mut self, name: &str, update: ContextUpdate) -> bool {
        let created = self.context(name).is_none();
        if created {
            self.contexts.push(Context::new(name));
        }
        if let Some(context) = self.contexts.iter_mut().find(|c| c.name == name) {
            if update.environment.is_some() {
                context.environment = update.environment;
            }
            if update.safety_level.is_some() {
                context.safety_level = update.safety_level;
            }
            if update.user_id.is_some() {
                context.user_id = update.user_id;
            }
        }
        debug!(context = name, created, "context set");
        created
    }

    /// Makes `name` the current context.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ContextNotFound`] if the context does not exist.
    pub fn use_context(&mut self, name: &str) -> Result<()> {
        if self.context(name).is_none() {
            return Err(ConfigError::ContextNotFound {
                name: name.to_string(),
            });
        }
        self.current_context = Some(name.to_string());
        Ok(())
    }

    /// Removes a context, clearing the current context if it pointed there.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ContextNotFound`] if the context does not exist.
    pub fn delete_context(&mut self, name: &str) -> Result<Context> {
        let index = self
            .contexts
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| ConfigError::ContextNotFound {
                name: name.to_string(),
            })?;
        if self.current_context.as_deref() == Some(name) {
            self.current_context = None;
        }
        Ok(self.contexts.remove(index))
    }

    /// Builds the safety checker for `context`, or the current context.
    ///
    /// With no context named and none current, the checker runs under
    /// [`NO_CONTEXT`] at the default level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ContextNotFound`] if the named or current
    /// context does not exist.
    pub fn safety_checker(&self, context: Option<&str>) -> Result<SafetyChecker> {
        if context.is_none() && self.current_context.is_none() {
            return Ok(SafetyChecker::new(NO_CONTEXT, SafetyLevel::default()));
        }
        let context = self.resolve_context(context)?;
        Ok(SafetyChecker::new(
            context.name.clone(),
            context.safety_level(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtctl_safety::{IdentityProvider, Operation, Ownership};
    use test_case::test_case;

    const SAMPLE: &str = r#"
apiVersion: v1
current-context: prod
contexts:
  - name: prod
    environment: https://abc12345.apps.example.com
    safety-level: readwrite-mine
    user-id: u-1
    token-ref: prod-token
  - name: dev
    environment: https://dev.apps.example.com
aliases:
  wf: get workflows
  count: "!dtctl get workflows -o json | jq length"
preferences:
  output: table
"#;

    fn no_builtins(_: &str) -> bool {
        false
    }

    #[test]
    fn parses_sample_document() {
        let config = Config::from_yaml(SAMPLE).expect("parse");
        assert_eq!(config.current_context.as_deref(), Some("prod"));
        assert_eq!(config.contexts.len(), 2);
        assert_eq!(config.aliases.get("wf"), Some("get workflows"));
        assert!(config.extra.contains_key("apiVersion"));
        assert!(config.extra.contains_key("preferences"));

        let prod = config.current().expect("current");
        assert_eq!(prod.safety_level(), SafetyLevel::ReadwriteMine);
        assert!(prod.extra.contains_key("token-ref"));
        assert_eq!(prod.identity().current_user_id().as_deref(), Some("u-1"));
    }

    #[test]
    fn unset_safety_level_defaults_to_readwrite_all() {
        let config = Config::from_yaml(SAMPLE).expect("parse");
        let dev = config.context("dev").expect("dev");
        assert_eq!(dev.safety_level, None);
        assert_eq!(dev.safety_level(), SafetyLevel::ReadwriteAll);
    }

    #[test]
    fn blank_document_is_empty_config() {
        assert_eq!(Config::from_yaml("").expect("parse"), Config::default());
        assert_eq!(Config::from_yaml("  \n").expect("parse"), Config::default());
    }

    #[test]
    fn rejects_unknown_safety_level() {
        let yaml = "contexts:\n  - name: prod\n    safety-level: yolo\n";
        assert!(Config::from_yaml(yaml).is_err());
    }

    #[test]
    fn load_missing_file_yields_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load(&dir.path().join("absent.yaml")).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        fs::write(&path, "contexts: [unclosed").expect("write");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn save_and_reload_preserves_unmodelled_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::from_yaml(SAMPLE).expect("parse");
        config
            .aliases
            .set("db", "get dashboards", &no_builtins)
            .expect("set alias");
        config.save(&path).expect("save");

        let reloaded = Config::load(&path).expect("reload");
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.aliases.get("db"), Some("get dashboards"));
        assert!(reloaded.extra.contains_key("preferences"));
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.yaml");
        Config::default().save(&path).expect("save");
        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn set_context_creates_then_updates() {
        let mut config = Config::default();
        let created = config.set_context(
            "prod",
            ContextUpdate {
                environment: Some("https://prod.example.com".to_string()),
                ..ContextUpdate::default()
            },
        );
        assert!(created);

        let created = config.set_context(
            "prod",
            ContextUpdate {
                safety_level: Some(SafetyLevel::Readonly),
                ..ContextUpdate::default()
            },
        );
        assert!(!created);

        let prod = config.context("prod").expect("prod");
        assert_eq!(prod.environment.as_deref(), Some("https://prod.example.com"));
        assert_eq!(prod.safety_level(), SafetyLevel::Readonly);
    }

    #[test]
    fn use_context_requires_existing_context() {
        let mut config = Config::default();
        let err = config.use_context("prod").unwrap_err();
        assert!(matches!(err, ConfigError::ContextNotFound { name } if name == "prod"));

        config.set_context("prod", ContextUpdate::default());
        config.use_context("prod").expect("use");
        assert_eq!(config.current().map(|c| c.name.as_str()), Some("prod"));
    }

    #[test]
    fn deleting_current_context_clears_it() {
        let mut config = Config::from_yaml(SAMPLE).expect("parse");
        let removed = config.delete_context("prod").expect("delete");
        assert_eq!(removed.name, "prod");
        assert!(config.current_context.is_none());
        assert!(config.delete_context("prod").is_err());
    }

    #[test_case(None, "prod", SafetyLevel::ReadwriteMine ; "current context")]
    #[test_case(Some("dev"), "dev", SafetyLevel::ReadwriteAll ; "named context")]
    fn safety_checker_for_context(name: Option<&str>, context: &str, level: SafetyLevel) {
        let config = Config::from_yaml(SAMPLE).expect("parse");
        let checker = config.safety_checker(name).expect("checker");
        assert_eq!(checker.context(), context);
        assert_eq!(checker.level(), level);
    }

    #[test]
    fn safety_checker_without_contexts_uses_default_level() {
        let checker = Config::default().safety_checker(None).expect("checker");
        assert_eq!(checker.context(), NO_CONTEXT);
        assert_eq!(checker.level(), SafetyLevel::ReadwriteAll);
        assert!(checker.check(Operation::Delete, Ownership::Unknown).is_ok());
    }

    #[test]
    fn safety_checker_for_missing_context_fails() {
        let config = Config::from_yaml(SAMPLE).expect("parse");
        assert!(matches!(
            config.safety_checker(Some("staging")),
            Err(ConfigError::ContextNotFound { .. })
        ));
    }

    #[test]
    fn resolve_context_without_current_fails() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_context(None),
            Err(ConfigError::NoCurrentContext)
        ));
    }
}
