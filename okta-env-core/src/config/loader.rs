use std::collections::HashMap;
use std::path::Path;

use super::layer::StaticLayer;
use super::value::{yaml_key, ConfigValue};
use super::ConfigError;

/// Load a YAML file as a named static layer. Returns `None` if the file does
/// not exist.
pub(crate) fn yaml_file_layer(path: &Path) -> Result<Option<StaticLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    let values = parse_yaml(&content)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    Ok(Some(StaticLayer::from_map(path.display().to_string(), values)))
}

/// Parse a YAML document into a flat map of dot-separated keys.
pub(crate) fn parse_yaml(content: &str) -> Result<HashMap<String, ConfigValue>, ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    let mut values = HashMap::new();
    flatten_yaml("", &yaml, &mut values);
    Ok(values)
}

/// Flatten a YAML tree into dot-separated keys.
fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, ConfigValue>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = yaml_key(k);
                let full_key = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            if !prefix.is_empty() {
                // Whole list under the parent key, each element under key.N
                out.insert(
                    prefix.to_string(),
                    ConfigValue::List(seq.iter().map(ConfigValue::from_yaml).collect()),
                );
                for (i, item) in seq.iter().enumerate() {
                    flatten_yaml(&format!("{prefix}.{i}"), item, out);
                }
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
            }
        }
    }
}
