// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! Values keep the type their source gave them: JSON and YAML files yield
//! numbers and booleans, while command-line arguments and environment
//! variables yield strings. The typed accessors coerce string representations,
//! so `"3"` from the environment reads as `3` just like a JSON `3` does.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A scalar configuration value.
///
/// # Examples
///
/// ```
/// use configue::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_i64("port").unwrap(), 42);
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i64("port").unwrap(), 42);
/// assert_eq!(value.as_str(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(Value);

impl ConfigValue {
    /// Wraps a JSON value.
    pub fn new(value: Value) -> Self {
        ConfigValue(value)
    }

    /// The null value. A key holding null is still defined.
    pub fn null() -> Self {
        ConfigValue(Value::Null)
    }

    /// Returns the underlying JSON value.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the value, returning the underlying JSON value.
    pub fn into_json(self) -> Value {
        self.0
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Returns `true` if this is the null value.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Converts the value to a boolean.
    ///
    /// Booleans pass through; numbers are `true` unless zero; strings are
    /// recognized case-insensitively:
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match &self.0 {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Ok(true),
                "false" | "no" | "0" | "off" => Ok(false),
                _ => s
                    .parse::<bool>()
                    .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
            },
            other => Err(Self::mismatch(key, "boolean", other)),
        }
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match &self.0 {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| Self::mismatch(key, "i64", &self.0)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(Self::mismatch(key, "i64", other)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        let wide = self.as_i64(key)?;
        i32::try_from(wide).map_err(|e| ConfigError::from_int_range_error(key.to_string(), "i32", e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        match &self.0 {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| Self::mismatch(key, "u64", &self.0)),
            Value::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
            other => Err(Self::mismatch(key, "u64", other)),
        }
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        let wide = self.as_u64(key)?;
        u32::try_from(wide).map_err(|e| ConfigError::from_int_range_error(key.to_string(), "u32", e))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match &self.0 {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| Self::mismatch(key, "f64", &self.0)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
            other => Err(Self::mismatch(key, "f64", other)),
        }
    }

    /// Parses the textual form of the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use configue::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.to_string()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }

    fn mismatch(key: &str, target_type: &str, found: &Value) -> ConfigError {
        ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: target_type.to_string(),
            source: format!("cannot convert {} to {}", found, target_type).into(),
        }
    }
}

impl From<Value> for ConfigValue {
    fn from(value: Value) -> Self {
        ConfigValue(value)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(Value::String(s))
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(Value::String(s.to_string()))
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue(Value::Bool(b))
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue(Value::from(n))
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue(Value::from(n))
    }
}

impl From<u64> for ConfigValue {
    fn from(n: u64) -> Self {
        ConfigValue(Value::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue(Value::from(n))
    }
}

impl From<ConfigValue> for Value {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

/// Strings display without quotes; every other value displays as JSON.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}
