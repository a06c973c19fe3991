//! PowerSearch: detect the search query on the current page and re-run it
//! on another search engine
//!
//! The registry matches page hostnames against known and user-defined search
//! engines, the extractor pulls the query out of the page URL, and the builder
//! renders it into another engine's URL template.

pub mod config;
pub mod engines;
pub mod error;
pub mod query;
pub mod search;
pub mod storage;

pub use config::Settings;
pub use engines::{CustomEngine, CustomEngineInput, EngineRegistry, TargetEngine};
pub use error::{Error, Result, ValidationError};
pub use query::{build_search_url, extract_query};
pub use search::SearchSession;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
