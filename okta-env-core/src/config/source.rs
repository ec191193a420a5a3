use std::collections::HashMap;

use super::value::ConfigValue;

/// Read access to the full, live environment.
///
/// Sources receive this on every call so they can make their visibility
/// depend on keys produced by other sources.
pub trait PropertyResolver {
    /// Whether any source currently defines `key`.
    fn contains_property(&self, key: &str) -> bool;

    /// The first value any source currently gives for `key`.
    fn property(&self, key: &str) -> Option<ConfigValue>;

    /// Like [`property`](Self::property), with every `${key}` placeholder
    /// expanded. `None` when the key is absent or cannot be resolved.
    fn resolved_property(&self, key: &str) -> Option<ConfigValue>;
}

/// A named, read-only source of configuration values.
///
/// Implementations must not hold mutable state: both methods are evaluated
/// fresh on every lookup and may be called concurrently.
pub trait PropertySource: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this source defines `key`, given the current environment.
    fn contains(&self, key: &str, env: &dyn PropertyResolver) -> bool;

    /// The value this source gives for `key`, or `None` if it does not
    /// define it.
    fn get(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue>;
}

/// Process environment variables, matched with relaxed key names.
///
/// `okta.oauth2.client-id` is looked up as `okta.oauth2.client-id` first,
/// then as `OKTA_OAUTH2_CLIENT_ID`.
#[derive(Debug, Clone)]
pub struct SystemEnvironmentSource {
    vars: HashMap<String, String>,
}

impl SystemEnvironmentSource {
    pub const NAME: &'static str = "systemEnvironment";

    /// Snapshot the current process environment.
    pub fn capture() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.vars.get(key).or_else(|| self.vars.get(&env_var_name(key)))
    }
}

/// `okta.oauth2.client-id` -> `OKTA_OAUTH2_CLIENT_ID`
pub fn env_var_name(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl PropertySource for SystemEnvironmentSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn contains(&self, key: &str, _env: &dyn PropertyResolver) -> bool {
        self.lookup(key).is_some()
    }

    fn get(&self, key: &str, _env: &dyn PropertyResolver) -> Option<ConfigValue> {
        self.lookup(key).cloned().map(ConfigValue::String)
    }
}
