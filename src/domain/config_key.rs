// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key newtype.
//!
//! Keys are flat strings. Nested structures coming from files are flattened
//! into dot-separated keys (`database.host`, `servers.0`), so a key is also a
//! path into the document it came from.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between the segments of a flattened key.
pub const KEY_SEPARATOR: char = '.';

/// A type-safe wrapper for configuration keys.
///
/// `ConfigKey` borrows as `str`, so layer stores keyed by `ConfigKey` can be
/// queried with plain string slices.
///
/// # Examples
///
/// ```
/// use configue::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("database").child("host");
/// assert_eq!(key.as_str(), "database.host");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a segment, inserting the separator unless this key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use configue::domain::config_key::ConfigKey;
    ///
    /// let root = ConfigKey::from("");
    /// assert_eq!(root.child("servers").child("0").as_str(), "servers.0");
    /// ```
    pub fn child(&self, segment: &str) -> ConfigKey {
        if self.0.is_empty() {
            ConfigKey(segment.to_string())
        } else {
            ConfigKey(format!("{}{}{}", self.0, KEY_SEPARATOR, segment))
        }
    }

    /// Iterates over the dot-separated segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<&String> for ConfigKey {
    fn from(s: &String) -> Self {
        ConfigKey(s.clone())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Must hash exactly like `str` so `HashMap<ConfigKey, _>` can be queried by `&str`.
impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
