// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mutable key/value store owned by a single layer.

use crate::domain::{ConfigKey, ConfigValue};
use std::collections::HashMap;

/// The key/value contents of one layer.
///
/// A store is populated once by its layer's source, then handed by `&mut` to
/// that layer's post-load hooks. Once registration finishes it is frozen
/// inside the resolver and only read.
///
/// # Examples
///
/// ```
/// use configue::domain::LayerStore;
///
/// let mut store = LayerStore::new();
/// store.set("x", 3);
/// let x = store.get("x").unwrap().as_i64("x").unwrap();
/// store.set("x", x * 10);
/// assert_eq!(store.get("x").unwrap().as_i64("x").unwrap(), 30);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerStore {
    values: HashMap<ConfigKey, ConfigValue>,
}

impl LayerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key`, if defined.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Returns `true` if `key` is defined, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Defines or overwrites `key`, returning the previous value.
    pub fn set(
        &mut self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    /// Iterates over the defined keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.values.keys()
    }

    /// Iterates over the entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.values.iter()
    }

    /// Number of defined keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no key is defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlays `other` onto this store; keys in `other` win.
    pub fn merge(&mut self, other: LayerStore) {
        self.values.extend(other.values);
    }
}

impl<K, V> FromIterator<(K, V)> for LayerStore
where
    K: Into<ConfigKey>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for LayerStore
where
    K: Into<ConfigKey>,
    V: Into<ConfigValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
