// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration for request-handling servers.
//!
//! Values are read from four layers and resolved through one lookup, with a
//! fixed precedence:
//!
//! 1. `argv`: command-line arguments
//! 2. `env`: environment variables
//! 3. `files`: configuration files, merged in the order given
//! 4. `defaults`: values supplied in code
//!
//! The first layer that defines a key wins. Each layer can be disabled, and
//! each can carry post-load hooks that edit its store right after it loads.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: keys, values, layers, stores, options and errors
//! - **Ports**: the `ConfigParser` and `ConfigSource` seams and the server host traits
//! - **Adapters**: argument, environment, file and in-memory sources; JSON and YAML parsers
//! - **Service**: layer loading, hook running, resolution and registration
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use configue::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let config = configue::register(
//!     ConfigOptions::builder()
//!         .file("config/app.json")
//!         .defaults([("port", 8080)])
//!         .post_hook("env", |store| {
//!             if let Some(port) = store.remove("PORT") {
//!                 store.set("port", port);
//!             }
//!         })
//!         .build(),
//! )?;
//!
//! let port = config.get("port").map(|v| v.as_u32("port")).transpose()?;
//! # Ok(())
//! # }
//! ```
//!
//! For a server, use [`service::Registration::register_on`] so the handle
//! is exposed on the server and on every request.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use service::register;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigLookup, ConfigOptions, ConfigValue, FileDescriptor,
        FileFormat, Layer, LayerStore, ProcessSnapshot, Result,
    };
    pub use crate::ports::{ConfigParser, ConfigSource, RequestScope, ServerHost};
    pub use crate::service::{Configue, Registration};

    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
    pub use crate::adapters::JsonParser;
}
