// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! A source is the natural population step of one layer: command-line
//! arguments for `argv`, the environment for `env`, merged files for `files`.

use crate::domain::{Layer, LayerStore, Result};

/// A trait for the sources that populate layers.
///
/// Sources are loaded exactly once, during registration. The resulting store
/// is then handed to the layer's post-load hooks and frozen.
///
/// # Examples
///
/// ```rust
/// use configue::ports::ConfigSource;
/// use configue::domain::{Layer, LayerStore, Result};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn layer(&self) -> Layer {
///         Layer::Defaults
///     }
///
///     fn load(&self) -> Result<LayerStore> {
///         Ok([("port", 8080)].into_iter().collect())
///     }
/// }
///
/// let store = Fixed.load().unwrap();
/// assert_eq!(Fixed.name(), "defaults");
/// assert!(store.contains("port"));
/// ```
pub trait ConfigSource: Send + Sync {
    /// The layer this source populates.
    fn layer(&self) -> Layer;

    /// Reads the source into a fresh store.
    fn load(&self) -> Result<LayerStore>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        self.layer().as_str()
    }
}
