// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-load hooks, grouped by the layer they mutate.

use crate::domain::{ConfigOptions, Layer, LayerStore, PostHook, Result};
use std::collections::HashMap;
use std::fmt;

/// Runs each layer's hooks against that layer's freshly loaded store.
///
/// Hooks for one layer run in declaration order, each seeing the writes of
/// the ones before it. A hook only ever sees its own layer.
///
/// # Examples
///
/// ```rust
/// use configue::domain::{ConfigOptions, Layer, LayerStore};
/// use configue::service::HookRunner;
///
/// let options = ConfigOptions::builder()
///     .post_hook("env", |store| {
///         store.set("who", "ME FIRST!");
///     })
///     .build();
/// let hooks = HookRunner::from_options(&options).unwrap();
///
/// let mut store = LayerStore::new();
/// hooks.run(Layer::Env, &mut store);
/// assert_eq!(store.get("who").unwrap().as_str(), Some("ME FIRST!"));
/// ```
#[derive(Clone, Default)]
pub struct HookRunner {
    hooks: HashMap<Layer, Vec<PostHook>>,
}

impl HookRunner {
    /// Groups the hooks declared in `options` by layer.
    ///
    /// Fails with `HookTarget` if a hook names something other than one of
    /// the four layers.
    pub fn from_options(options: &ConfigOptions) -> Result<Self> {
        let mut hooks: HashMap<Layer, Vec<PostHook>> = HashMap::new();
        for (name, declared) in options.post_hooks() {
            let layer: Layer = name.parse()?;
            hooks
                .entry(layer)
                .or_default()
                .extend(declared.iter().cloned());
        }
        Ok(Self { hooks })
    }

    /// Returns `true` if at least one hook targets `layer`.
    pub fn has_hooks(&self, layer: Layer) -> bool {
        self.hooks.get(&layer).is_some_and(|hooks| !hooks.is_empty())
    }

    /// Number of hooks targeting `layer`.
    pub fn count(&self, layer: Layer) -> usize {
        self.hooks.get(&layer).map_or(0, Vec::len)
    }

    /// Runs `layer`'s hooks, in order, against `store`.
    pub fn run(&self, layer: Layer, store: &mut LayerStore) {
        let Some(hooks) = self.hooks.get(&layer) else {
            return;
        };
        for hook in hooks {
            hook(store);
        }
        tracing::debug!(
            "Ran {} post-load hooks on layer '{}' ({} keys after)",
            hooks.len(),
            layer,
            store.len()
        );
    }
}

impl fmt::Debug for HookRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(Layer, usize)> = self
            .hooks
            .iter()
            .map(|(layer, hooks)| (*layer, hooks.len()))
            .collect();
        counts.sort();
        f.debug_struct("HookRunner").field("hooks", &counts).finish()
    }
}
