// SPDX-License-Identifier: MIT OR Apache-2.0

//! Precedence-ordered lookup over the loaded layers.

use crate::domain::{ConfigLookup, ConfigValue, Layer, LayerStore};
use crate::service::SourceLayerSet;

/// Read-only composition of the enabled layers.
///
/// A lookup walks the layers from `argv` down to `defaults` and returns the
/// first value found. Values are never merged across layers: a key defined
/// by a higher layer hides the whole value below it, whatever it is (`0`,
/// `false`, `""` and `null` all count as defined).
///
/// The resolver is immutable once built, so any number of threads can read
/// it through a shared reference without locking.
///
/// # Examples
///
/// ```rust
/// use configue::domain::{ConfigLookup, Layer, LayerStore};
/// use configue::service::{LayeredResolver, SourceLayerSet};
///
/// let mut env = LayerStore::new();
/// env.set("who", "NO");
/// let mut defaults = LayerStore::new();
/// defaults.set("who", "nobody");
/// defaults.set("port", 8080);
///
/// let resolver = LayeredResolver::new(SourceLayerSet::from_stores(vec![
///     (Layer::Env, env),
///     (Layer::Defaults, defaults),
/// ]));
///
/// assert_eq!(resolver.get("who").unwrap().as_str(), Some("NO"));
/// assert_eq!(resolver.source_of("port"), Some(Layer::Defaults));
/// assert!(resolver.get("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayeredResolver {
    layers: SourceLayerSet,
}

impl LayeredResolver {
    /// Creates a resolver over loaded layers.
    pub fn new(layers: SourceLayerSet) -> Self {
        Self { layers }
    }

    /// Enabled layers, highest precedence first.
    pub fn layers(&self) -> Vec<Layer> {
        self.layers.layers().collect()
    }

    /// The store of a single layer, if enabled.
    pub fn layer_store(&self, layer: Layer) -> Option<&LayerStore> {
        self.layers.store(layer)
    }

    fn lookup(&self, key: &str) -> Option<(Layer, &ConfigValue)> {
        self.layers
            .iter()
            .find_map(|(layer, store)| store.get(key).map(|value| (layer, value)))
    }
}

impl ConfigLookup for LayeredResolver {
    fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.lookup(key).map(|(_, value)| value)
    }

    fn source_of(&self, key: &str) -> Option<Layer> {
        self.lookup(key).map(|(layer, _)| layer)
    }
}
