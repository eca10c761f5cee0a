// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! Everything here is free of I/O apart from [`ProcessSnapshot::capture`]:
//! keys, values, layers and their stores, registration options and errors.

pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod layer;
pub mod options;
pub mod service;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, Result};
pub use layer::Layer;
pub use options::{ConfigOptions, ConfigOptionsBuilder, DisableSet, FileDescriptor, FileFormat, PostHook};
pub use service::ConfigLookup;
pub use snapshot::ProcessSnapshot;
pub use store::LayerStore;
