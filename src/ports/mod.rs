// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams of the crate: parsers and sources are
//! implemented by the adapters layer, the host traits by whatever server
//! embeds the configuration.

pub mod host;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use host::{RequestDecorator, RequestScope, ServerHost};
pub use parser::ConfigParser;
pub use source::ConfigSource;
