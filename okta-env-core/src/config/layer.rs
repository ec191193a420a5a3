use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::source::{PropertyResolver, PropertySource};
use super::value::ConfigValue;

/// A derived, read-only configuration layer.
///
/// Every variant answers `contains`/`get` against the live environment at
/// lookup time and keeps no state between calls.
#[derive(Debug, Clone)]
pub enum ConfigLayer {
    Static(StaticLayer),
    Conditional(ConditionalLayer),
    Alias(AliasLayer),
    Computed(ComputedLayer),
}

impl ConfigLayer {
    pub fn name(&self) -> &str {
        match self {
            ConfigLayer::Static(l) => &l.name,
            ConfigLayer::Conditional(l) => &l.name,
            ConfigLayer::Alias(l) => &l.name,
            ConfigLayer::Computed(l) => &l.name,
        }
    }

    /// Every key this layer could ever define, sorted.
    pub fn defined_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = match self {
            ConfigLayer::Static(l) => l.values.keys().map(String::as_str).collect(),
            ConfigLayer::Conditional(l) => l.values.keys().map(String::as_str).collect(),
            ConfigLayer::Alias(l) => l.aliases.keys().map(String::as_str).collect(),
            ConfigLayer::Computed(l) => vec![l.key.as_str()],
        };
        keys.sort_unstable();
        keys
    }
}

impl ConfigLayer {
    fn source(&self) -> &dyn PropertySource {
        match self {
            ConfigLayer::Static(l) => l,
            ConfigLayer::Conditional(l) => l,
            ConfigLayer::Alias(l) => l,
            ConfigLayer::Computed(l) => l,
        }
    }
}

impl PropertySource for ConfigLayer {
    fn name(&self) -> &str {
        ConfigLayer::name(self)
    }

    fn contains(&self, key: &str, env: &dyn PropertyResolver) -> bool {
        self.source().contains(key, env)
    }

    fn get(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue> {
        self.source().get(key, env)
    }
}

/// Fixed key/value map, always visible.
#[derive(Debug, Clone)]
pub struct StaticLayer {
    name: String,
    values: HashMap<String, ConfigValue>,
}

impl StaticLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_map(name, HashMap::new())
    }

    pub fn from_map(name: impl Into<String>, values: HashMap<String, ConfigValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

/// Fixed key/value map, visible only while every `required` key is present
/// and no `forbidden` key is.
///
/// Prerequisites are checked against the whole environment on every call,
/// so keys produced by other layers count.
#[derive(Debug, Clone)]
pub struct ConditionalLayer {
    name: String,
    values: HashMap<String, ConfigValue>,
    required: Vec<String>,
    forbidden: Vec<String>,
}

impl ConditionalLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
            required: Vec::new(),
            forbidden: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn requires(mut self, key: impl Into<String>) -> Self {
        self.required.push(key.into());
        self
    }

    pub fn forbids(mut self, key: impl Into<String>) -> Self {
        self.forbidden.push(key.into());
        self
    }

    fn is_visible(&self, key: &str, env: &dyn PropertyResolver) -> bool {
        // Own key first: prerequisite lookups re-enter the environment.
        self.values.contains_key(key)
            && self.required.iter().all(|k| env.contains_property(k))
            && !self.forbidden.iter().any(|k| env.contains_property(k))
    }
}

/// Pass-through from one key to another key's live value.
#[derive(Debug, Clone)]
pub struct AliasLayer {
    name: String,
    aliases: HashMap<String, String>,
}

impl AliasLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: HashMap::new(),
        }
    }

    /// Make `key` resolve to whatever `target` currently resolves to.
    pub fn alias(mut self, key: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(key.into(), target.into());
        self
    }

    fn target(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }
}

type ComputeFn = dyn Fn(&dyn PropertyResolver) -> Option<ConfigValue> + Send + Sync;

/// A single key whose value is a pure function of the environment.
///
/// The key is visible exactly when the function yields a value.
#[derive(Clone)]
pub struct ComputedLayer {
    name: String,
    key: String,
    compute: Arc<ComputeFn>,
}

impl ComputedLayer {
    pub fn new<F>(name: impl Into<String>, key: impl Into<String>, compute: F) -> Self
    where
        F: Fn(&dyn PropertyResolver) -> Option<ConfigValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            key: key.into(),
            compute: Arc::new(compute),
        }
    }

    fn compute(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue> {
        if key == self.key {
            (self.compute)(env)
        } else {
            None
        }
    }
}

impl fmt::Debug for ComputedLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedLayer")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl PropertySource for StaticLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, key: &str, _env: &dyn PropertyResolver) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &str, _env: &dyn PropertyResolver) -> Option<ConfigValue> {
        self.values.get(key).cloned()
    }
}

impl PropertySource for ConditionalLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, key: &str, env: &dyn PropertyResolver) -> bool {
        self.is_visible(key, env)
    }

    fn get(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue> {
        if self.is_visible(key, env) {
            self.values.get(key).cloned()
        } else {
            None
        }
    }
}

impl PropertySource for AliasLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, key: &str, env: &dyn PropertyResolver) -> bool {
        self.target(key).is_some_and(|t| env.contains_property(t))
    }

    fn get(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue> {
        self.target(key).and_then(|t| env.property(t))
    }
}

impl PropertySource for ComputedLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, key: &str, env: &dyn PropertyResolver) -> bool {
        self.compute(key, env).is_some()
    }

    fn get(&self, key: &str, env: &dyn PropertyResolver) -> Option<ConfigValue> {
        self.compute(key, env)
    }
}

impl From<StaticLayer> for ConfigLayer {
    fn from(layer: StaticLayer) -> Self {
        ConfigLayer::Static(layer)
    }
}

impl From<ConditionalLayer> for ConfigLayer {
    fn from(layer: ConditionalLayer) -> Self {
        ConfigLayer::Conditional(layer)
    }
}

impl From<AliasLayer> for ConfigLayer {
    fn from(layer: AliasLayer) -> Self {
        ConfigLayer::Alias(layer)
    }
}

impl From<ComputedLayer> for ConfigLayer {
    fn from(layer: ComputedLayer) -> Self {
        ConfigLayer::Computed(layer)
    }
}
