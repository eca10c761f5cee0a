// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup trait shared by the resolver and every handle that exposes it.

use crate::domain::{ConfigValue, Layer};

/// Read-only access to resolved configuration.
///
/// Implementors answer from a fixed, fully-loaded set of layers, so lookups
/// never fail: an undefined key is simply `None`.
///
/// # Examples
///
/// ```rust
/// use configue::domain::{ConfigLookup, ConfigValue, Layer};
///
/// struct Fixed;
///
/// impl ConfigLookup for Fixed {
///     fn get(&self, key: &str) -> Option<&ConfigValue> {
///         None
///     }
///
///     fn source_of(&self, key: &str) -> Option<Layer> {
///         None
///     }
/// }
///
/// let lookup = Fixed;
/// assert!(!lookup.has("anything"));
/// assert_eq!(
///     lookup.get_or_default("port", ConfigValue::from(8080)),
///     ConfigValue::from(8080)
/// );
/// ```
pub trait ConfigLookup: Send + Sync {
    /// Returns the value from the highest-precedence layer defining `key`.
    fn get(&self, key: &str) -> Option<&ConfigValue>;

    /// Returns the layer that supplies the value for `key`.
    fn source_of(&self, key: &str) -> Option<Layer>;

    /// Returns `true` if any enabled layer defines `key`.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the resolved value for `key`, or `default` if it is undefined.
    fn get_or_default(&self, key: &str, default: ConfigValue) -> ConfigValue {
        self.get(key).cloned().unwrap_or(default)
    }
}
