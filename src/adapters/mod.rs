// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source and parser implementations.
//!
//! Each layer has one natural source here: `argv` from [`CommandLineAdapter`],
//! `env` from [`EnvVarAdapter`], `files` from [`FilesAdapter`] and `defaults`
//! from an empty [`MemoryAdapter`]. File formats are handled by parsers
//! implementing `ConfigParser`.

pub mod cli;
pub mod env_var;
pub mod file_loader;
pub mod json;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
pub use cli::CommandLineAdapter;
pub use env_var::EnvVarAdapter;
pub use file_loader::{FileLoader, FilesAdapter, ParserRegistry};
pub use json::JsonParser;
pub use memory::MemoryAdapter;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
