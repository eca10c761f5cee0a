// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML parser, available with the `yaml` feature.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigParser;
use std::collections::HashMap;

/// YAML parser implementation.
///
/// This parser converts YAML documents into flat key-value maps using dot
/// notation for nested structures. Non-string mapping keys (numbers, booleans)
/// are used by their textual form.
///
/// # Examples
///
/// ```rust
/// use configue::adapters::YamlParser;
/// use configue::domain::ConfigValue;
/// use configue::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let yaml_content = "database:\n  host: localhost\n  port: 5432";
/// let result = parser.parse(yaml_content).unwrap();
/// assert_eq!(result.get("database.host"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(result.get("database.port"), Some(&ConfigValue::from(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn key_segment(key: &serde_yaml::Value) -> Option<String> {
        match key {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn scalar(number: &serde_yaml::Number) -> ConfigValue {
        if let Some(i) = number.as_i64() {
            ConfigValue::from(i)
        } else if let Some(u) = number.as_u64() {
            ConfigValue::from(u)
        } else {
            ConfigValue::from(number.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Flattens a YAML value into a flat map with dot notation keys.
    fn flatten_yaml(
        value: &serde_yaml::Value,
        prefix: &ConfigKey,
        result: &mut HashMap<String, ConfigValue>,
    ) {
        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    if let Some(segment) = Self::key_segment(key) {
                        Self::flatten_yaml(val, &prefix.child(&segment), result);
                    }
                }
            }
            serde_yaml::Value::Sequence(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten_yaml(val, &prefix.child(&i.to_string()), result);
                }
            }
            serde_yaml::Value::String(s) => {
                result.insert(prefix.to_string(), ConfigValue::from(s.as_str()));
            }
            serde_yaml::Value::Number(n) => {
                result.insert(prefix.to_string(), Self::scalar(n));
            }
            serde_yaml::Value::Bool(b) => {
                result.insert(prefix.to_string(), ConfigValue::from(*b));
            }
            serde_yaml::Value::Null => {
                result.insert(prefix.to_string(), ConfigValue::null());
            }
            serde_yaml::Value::Tagged(tagged) => {
                Self::flatten_yaml(&tagged.value, prefix, result);
            }
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        match value {
            // An empty document has no keys.
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(_) => {
                Self::flatten_yaml(&value, &ConfigKey::from(""), &mut result);
            }
            _ => {
                return Err(ConfigError::ParseError {
                    message: "YAML configuration must be a mapping at the top level".to_string(),
                    source: None,
                })
            }
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
