// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory source, the natural source of the `defaults` layer.

use crate::domain::{ConfigKey, ConfigValue, Layer, LayerStore, Result};
use crate::ports::ConfigSource;

/// A source backed by values held in memory.
///
/// The `defaults` layer loads from an empty `MemoryAdapter`; its contents
/// come from hooks.
///
/// # Examples
///
/// ```rust
/// use configue::adapters::MemoryAdapter;
/// use configue::domain::Layer;
/// use configue::ports::ConfigSource;
///
/// let adapter = MemoryAdapter::new(Layer::Defaults).with_value("port", 8080);
/// let store = adapter.load().unwrap();
/// assert_eq!(store.get("port").unwrap().as_i64("port").unwrap(), 8080);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
    layer: Layer,
    values: LayerStore,
}

impl MemoryAdapter {
    /// Creates an empty source for `layer`.
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            values: LayerStore::new(),
        }
    }

    /// Adds a value.
    pub fn with_value(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.values.set(key, value);
        self
    }
}

impl ConfigSource for MemoryAdapter {
    fn layer(&self) -> Layer {
        self.layer
    }

    fn load(&self) -> Result<LayerStore> {
        Ok(self.values.clone())
    }
}
