// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: loading the layers, resolving lookups, and registering the
//! result with a host.

pub mod hooks;
pub mod layer_set;
pub mod registration;
pub mod resolver;

// Re-export commonly used types
pub use hooks::HookRunner;
pub use layer_set::SourceLayerSet;
pub use registration::{register, Configue, Registration};
pub use resolver::LayeredResolver;
