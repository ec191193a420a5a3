pub mod layer;
mod loader;
pub mod placeholder;
pub mod source;
pub mod value;

use std::cell::Cell;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use layer::{AliasLayer, ComputedLayer, ConditionalLayer, ConfigLayer, StaticLayer};
pub use placeholder::{resolve_placeholders, MAX_PLACEHOLDER_DEPTH};
pub use source::{PropertyResolver, PropertySource, SystemEnvironmentSource};
pub use value::{ConfigValue, FromConfigValue};

thread_local! {
    static RESOLVE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// A `${...}` placeholder could not be resolved.
    Placeholder(String),
    /// A post-processor failed and bootstrap was aborted.
    Bootstrap { processor: &'static str, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Placeholder(msg) => write!(f, "Config placeholder error: {msg}"),
            ConfigError::Bootstrap { processor, message } => {
                write!(f, "Environment post-processor '{processor}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Layered application configuration.
///
/// An ordered list of [`PropertySource`]s; the first source that defines a
/// key wins. [`Environment::load`] builds the usual stack, highest priority
/// first:
///
/// 1. Environment variables (`OKTA_OAUTH2_ISSUER` matches `okta.oauth2.issuer`)
/// 2. `application-{profile}.yaml`
/// 3. `application.yaml`
///
/// `.env` and `.env.{profile}` are loaded into the process environment first
/// and never overwrite already-set variables. The profile is taken from the
/// `OKTA_ENV_PROFILE` env var, else the argument.
///
/// `${key}` placeholders are not expanded at load time. [`Environment::get_resolved`]
/// expands them against the environment at read time, so a placeholder can
/// point at a key produced by a source added later.
#[derive(Clone)]
pub struct Environment {
    sources: Vec<Arc<dyn PropertySource>>,
    profile: String,
}

impl Environment {
    /// Load configuration for the given profile from the working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration for the given profile from `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile =
            std::env::var("OKTA_ENV_PROFILE").unwrap_or_else(|_| profile.to_string());

        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        let mut env = Environment::new(&active_profile);
        env.add_last(SystemEnvironmentSource::capture());
        let profile_path = dir.join(format!("application-{active_profile}.yaml"));
        if let Some(layer) = loader::yaml_file_layer(&profile_path)? {
            env.add_last(ConfigLayer::Static(layer));
        }
        if let Some(layer) = loader::yaml_file_layer(&dir.join("application.yaml"))? {
            env.add_last(ConfigLayer::Static(layer));
        }

        tracing::debug!(profile = %env.profile, sources = ?env.source_names(), "Environment loaded");
        Ok(env)
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let values = loader::parse_yaml(yaml)?;
        let mut env = Environment::new(profile);
        env.add_last(ConfigLayer::Static(StaticLayer::from_map("inline-yaml", values)));
        Ok(env)
    }

    /// An environment with no sources.
    pub fn new(profile: &str) -> Self {
        Environment {
            sources: Vec::new(),
            profile: profile.to_string(),
        }
    }

    /// Create an empty config (useful for testing).
    pub fn empty() -> Self {
        Self::new("test")
    }

    /// Add a source with the highest priority.
    pub fn add_first(&mut self, source: impl PropertySource + 'static) {
        self.sources.insert(0, Arc::new(source));
    }

    /// Add a source with the lowest priority.
    pub fn add_last(&mut self, source: impl PropertySource + 'static) {
        self.sources.push(Arc::new(source));
    }

    /// Names of all sources, highest priority first.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn has_source(&self, name: &str) -> bool {
        self.sources.iter().any(|s| s.name() == name)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Check whether any source currently defines the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.contains_property(key)
    }

    /// The raw value for a key, placeholders untouched.
    pub fn value(&self, key: &str) -> Option<ConfigValue> {
        self.property(key)
    }

    /// Get a typed value for the given key, placeholders untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no source defines the key, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .property(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(&value, key)
    }

    /// Get a typed value, returning a default if the key is missing or
    /// cannot be converted.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Get a typed value with every `${key}` placeholder expanded.
    ///
    /// # Errors
    ///
    /// As [`Environment::get`], plus `ConfigError::Placeholder` when a
    /// placeholder is unclosed, refers to a missing key, or nests deeper than
    /// [`MAX_PLACEHOLDER_DEPTH`].
    pub fn get_resolved<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .property(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        let resolved = self.resolve_value(&value, 0)?;
        V::from_config_value(&resolved, key)
    }

    /// Like [`Environment::get_resolved`], but a missing key is `Ok(None)`.
    pub fn get_optional<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        match self.get_resolved(key) {
            Ok(v) => Ok(Some(v)),
            Err(ConfigError::NotFound(missing)) if missing == key => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn resolve_value(&self, value: &ConfigValue, depth: usize) -> Result<ConfigValue, ConfigError> {
        match value {
            ConfigValue::String(s) => self.resolve_string(s, depth).map(ConfigValue::String),
            ConfigValue::List(items) => items
                .iter()
                .map(|item| self.resolve_value(item, depth))
                .collect::<Result<Vec<_>, _>>()
                .map(ConfigValue::List),
            other => Ok(other.clone()),
        }
    }

    fn resolve_string(&self, raw: &str, depth: usize) -> Result<String, ConfigError> {
        if !placeholder::has_placeholder(raw) {
            return Ok(raw.to_string());
        }
        if depth >= MAX_PLACEHOLDER_DEPTH {
            return Err(ConfigError::Placeholder(format!(
                "placeholders nested deeper than {MAX_PLACEHOLDER_DEPTH} in '{raw}' (circular reference?)"
            )));
        }
        resolve_placeholders(raw, |reference| {
            let value = self.property(reference).ok_or_else(|| {
                ConfigError::Placeholder(format!("could not resolve '{reference}' in '{raw}'"))
            })?;
            let text = match &value {
                ConfigValue::List(items) => items
                    .iter()
                    .filter_map(ConfigValue::scalar_string)
                    .collect::<Vec<_>>()
                    .join(","),
                other => other.scalar_string().ok_or_else(|| ConfigError::TypeMismatch {
                    key: reference.to_string(),
                    expected: "String",
                })?,
            };
            self.resolve_string(&text, depth + 1)
        })
    }
}

impl PropertyResolver for Environment {
    fn contains_property(&self, key: &str) -> bool {
        self.sources.iter().any(|s| s.contains(key, self))
    }

    fn property(&self, key: &str) -> Option<ConfigValue> {
        self.sources.iter().find_map(|s| s.get(key, self))
    }

    fn resolved_property(&self, key: &str) -> Option<ConfigValue> {
        // Computed sources re-enter here while resolving; bound the nesting.
        let depth = RESOLVE_DEPTH.with(Cell::get);
        if depth >= MAX_PLACEHOLDER_DEPTH {
            return None;
        }
        RESOLVE_DEPTH.with(|d| d.set(depth + 1));
        let resolved = self
            .property(key)
            .and_then(|value| self.resolve_value(&value, 0).ok());
        RESOLVE_DEPTH.with(|d| d.set(depth));
        resolved
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("profile", &self.profile)
            .field("sources", &self.source_names())
            .finish()
    }
}
