// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four built-in configuration layers and their precedence.

use crate::domain::{ConfigError, Result};
use std::fmt;
use std::str::FromStr;

/// A named configuration layer.
///
/// Variants are declared in descending precedence: a value in `Argv` shadows
/// the same key in `Env`, which shadows `Files`, which shadows `Defaults`.
/// `Ord` follows declaration order, so sorting layers yields lookup order.
///
/// # Examples
///
/// ```
/// use configue::domain::Layer;
///
/// let layer: Layer = "env".parse().unwrap();
/// assert_eq!(layer, Layer::Env);
/// assert!(Layer::Argv.shadows(Layer::Env));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    /// Command-line arguments (highest precedence)
    Argv,
    /// Process environment variables
    Env,
    /// Merged configuration files
    Files,
    /// Static fallback values (lowest precedence)
    Defaults,
}

impl Layer {
    /// All layers in lookup order, highest precedence first.
    pub const PRECEDENCE: [Layer; 4] = [Layer::Argv, Layer::Env, Layer::Files, Layer::Defaults];

    /// Returns the lowercase layer name used in options and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Argv => "argv",
            Layer::Env => "env",
            Layer::Files => "files",
            Layer::Defaults => "defaults",
        }
    }

    /// Returns `true` if values in `self` win over values in `other`.
    pub fn shadows(self, other: Layer) -> bool {
        self < other
    }
}

impl FromStr for Layer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argv" => Ok(Layer::Argv),
            "env" => Ok(Layer::Env),
            "files" => Ok(Layer::Files),
            "defaults" => Ok(Layer::Defaults),
            other => Err(ConfigError::HookTarget {
                layer: other.to_string(),
            }),
        }
    }
}

impl AsRef<str> for Layer {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
