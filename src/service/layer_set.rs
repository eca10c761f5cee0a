// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading of the four layers, in precedence order.

use crate::adapters::{CommandLineAdapter, EnvVarAdapter, FileLoader, FilesAdapter, MemoryAdapter};
use crate::domain::{ConfigOptions, Layer, LayerStore, ProcessSnapshot, Result};
use crate::ports::ConfigSource;
use crate::service::HookRunner;

/// The loaded stores of every enabled layer, highest precedence first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceLayerSet {
    layers: Vec<(Layer, LayerStore)>,
}

impl SourceLayerSet {
    /// Loads every enabled layer from its natural source and runs its hooks.
    ///
    /// A disabled layer never touches its source (a disabled `files` layer
    /// reads no files). Hooks aimed at a disabled layer still run, against an
    /// empty store, but what they write is dropped.
    pub fn build(
        options: &ConfigOptions,
        snapshot: &ProcessSnapshot,
        loader: &FileLoader,
        hooks: &HookRunner,
    ) -> Result<Self> {
        let mut layers = Vec::with_capacity(Layer::PRECEDENCE.len());

        for layer in Layer::PRECEDENCE {
            if options.disable().is_disabled(layer) {
                if hooks.has_hooks(layer) {
                    tracing::warn!(
                        "Layer '{}' is disabled; its {} post-load hooks run on an empty store and their writes are discarded",
                        layer,
                        hooks.count(layer)
                    );
                    let mut discarded = LayerStore::new();
                    hooks.run(layer, &mut discarded);
                } else {
                    tracing::debug!("Layer '{}' is disabled", layer);
                }
                continue;
            }

            let source = natural_source(layer, options, snapshot, loader);
            let mut store = source.load()?;
            tracing::debug!("Loaded {} keys into layer '{}'", store.len(), source.name());

            hooks.run(layer, &mut store);
            layers.push((layer, store));
        }

        Ok(Self { layers })
    }

    /// Creates a set from already-loaded stores, keeping precedence order.
    pub fn from_stores(stores: impl IntoIterator<Item = (Layer, LayerStore)>) -> Self {
        let mut layers: Vec<(Layer, LayerStore)> = stores.into_iter().collect();
        layers.sort_by_key(|(layer, _)| *layer);
        layers.dedup_by_key(|(layer, _)| *layer);
        Self { layers }
    }

    /// Enabled layers, highest precedence first.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().map(|(layer, _)| *layer)
    }

    /// The store of `layer`, if it is enabled.
    pub fn store(&self, layer: Layer) -> Option<&LayerStore> {
        self.layers
            .iter()
            .find(|(candidate, _)| *candidate == layer)
            .map(|(_, store)| store)
    }

    /// `(layer, store)` pairs, highest precedence first.
    pub fn iter(&self) -> impl Iterator<Item = (Layer, &LayerStore)> {
        self.layers.iter().map(|(layer, store)| (*layer, store))
    }
}

fn natural_source<'a>(
    layer: Layer,
    options: &'a ConfigOptions,
    snapshot: &ProcessSnapshot,
    loader: &'a FileLoader,
) -> Box<dyn ConfigSource + 'a> {
    match layer {
        Layer::Argv => Box::new(CommandLineAdapter::from_snapshot(snapshot)),
        Layer::Env => Box::new(EnvVarAdapter::from_snapshot(snapshot)),
        Layer::Files => Box::new(FilesAdapter::new(loader, options.files())),
        Layer::Defaults => Box::new(MemoryAdapter::new(Layer::Defaults)),
    }
}
