// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable source for the `env` layer.

use crate::domain::{Layer, LayerStore, ProcessSnapshot, Result};
use crate::ports::ConfigSource;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// Every variable becomes one entry, keyed by its name exactly as it appears
/// in the environment, with its value as a string.
///
/// # Examples
///
/// ```rust
/// use configue::adapters::EnvVarAdapter;
/// use configue::domain::ProcessSnapshot;
/// use configue::ports::ConfigSource;
///
/// let snapshot = ProcessSnapshot::new().with_var("who", "NO");
/// let store = EnvVarAdapter::from_snapshot(&snapshot).load().unwrap();
/// assert_eq!(store.get("who").unwrap().as_str(), Some("NO"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EnvVarAdapter {
    vars: Vec<(String, String)>,
}

impl EnvVarAdapter {
    /// Creates an adapter over explicit variables.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Creates an adapter over the variables held by a process snapshot.
    pub fn from_snapshot(snapshot: &ProcessSnapshot) -> Self {
        Self {
            vars: snapshot.vars().to_vec(),
        }
    }
}

impl ConfigSource for EnvVarAdapter {
    fn layer(&self) -> Layer {
        Layer::Env
    }

    fn load(&self) -> Result<LayerStore> {
        let mut store = LayerStore::new();

        for (key, value) in &self.vars {
            // Validate input sizes to prevent DoS
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            store.set(key.as_str(), value.as_str());
        }

        tracing::debug!("Loaded {} environment variables", store.len());

        Ok(store)
    }
}
