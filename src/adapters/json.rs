// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in JSON parser.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigParser;
use serde_json::Value;
use std::collections::HashMap;

/// JSON parser implementation.
///
/// Converts a JSON object into a flat key-value map using dot notation for
/// nested objects and array indices. Scalars keep their JSON type.
///
/// # Examples
///
/// ```rust
/// use configue::adapters::JsonParser;
/// use configue::domain::ConfigValue;
/// use configue::ports::ConfigParser;
///
/// let parser = JsonParser::new();
/// let result = parser.parse(r#"{"database": {"host": "localhost", "port": 5432}}"#).unwrap();
/// assert_eq!(result.get("database.host"), Some(&ConfigValue::from("localhost")));
/// assert_eq!(result.get("database.port"), Some(&ConfigValue::from(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    /// Flattens a JSON value into a flat map with dot notation keys.
    fn flatten_json(value: &Value, prefix: &ConfigKey, result: &mut HashMap<String, ConfigValue>) {
        match value {
            Value::Object(map) => {
                for (key, val) in map {
                    Self::flatten_json(val, &prefix.child(key), result);
                }
            }
            Value::Array(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten_json(val, &prefix.child(&i.to_string()), result);
                }
            }
            scalar => {
                result.insert(prefix.as_str().to_string(), ConfigValue::new(scalar.clone()));
            }
        }
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
        let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })?;

        if !value.is_object() {
            return Err(ConfigError::ParseError {
                message: "JSON configuration must be an object at the top level".to_string(),
                source: None,
            });
        }

        let mut result = HashMap::new();
        Self::flatten_json(&value, &ConfigKey::from(""), &mut result);
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
