// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, the capability the file loader
//! uses to turn file contents into key/value pairs. JSON ships built in; any
//! other format plugs in by implementing this trait.

use crate::domain::{ConfigValue, Result};
use std::collections::HashMap;

/// A trait for parsing configuration files.
///
/// # Key Format
///
/// Parsers should flatten nested structures using dot notation. For example,
/// a document like:
///
/// ```yaml
/// database:
///   host: localhost
///   port: 5432
/// ```
///
/// Should be parsed into:
/// - `database.host` -> `"localhost"`
/// - `database.port` -> `5432`
///
/// # Thread Safety
///
/// Parsers are shared behind `Arc` between file descriptors and the loader's
/// registry, so implementations must be `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use configue::ports::ConfigParser;
/// use configue::domain::{ConfigValue, Result};
/// use std::collections::HashMap;
///
/// /// Parses `key=value` lines.
/// struct LinesParser;
///
/// impl ConfigParser for LinesParser {
///     fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim().to_string(), ConfigValue::from(v.trim())))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["env", "properties"]
///     }
/// }
///
/// let parsed = LinesParser.parse("key = value").unwrap();
/// assert_eq!(parsed.get("key"), Some(&ConfigValue::from("value")));
/// assert_eq!(LinesParser.format_name(), "env");
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a flat key-value map.
    ///
    /// # Returns
    ///
    /// * `Ok(HashMap<String, ConfigValue>)` - The parsed configuration
    /// * `Err(ConfigError::ParseError)` - The content is malformed
    fn parse(&self, content: &str) -> Result<HashMap<String, ConfigValue>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    ///
    /// The file loader uses these to infer a parser when a file descriptor
    /// does not name one, and to resolve format names like `"yaml"`.
    fn supported_extensions(&self) -> &[&str];

    /// A short name for logs; defaults to the first supported extension.
    fn format_name(&self) -> &str {
        self.supported_extensions().first().copied().unwrap_or("custom")
    }
}
