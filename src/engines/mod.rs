//! Search engine module
//!
//! Built-in URL patterns, user-defined engines and the registry that combines them.

mod builtin;
mod loader;
mod registry;
mod types;

pub use builtin::builtin_engines;
pub use loader::EngineLoader;
pub use registry::EngineRegistry;
pub use types::*;
