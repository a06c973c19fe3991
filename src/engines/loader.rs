//! Loading and saving the custom engine list

use super::registry::EngineRegistry;
use super::types::CustomEngine;
use crate::error::Result;
use crate::storage::KeyValueStore;
use serde_json::Value;
use tracing::{info, warn};

/// Moves the custom engine list between a store and a registry
pub struct EngineLoader;

impl EngineLoader {
    /// Build a registry from the custom engines stored under `key`.
    ///
    /// A missing key is an empty list. Entries that fail to deserialize are
    /// skipped, the rest are validated by the registry.
    pub async fn load(store: &dyn KeyValueStore, key: &str) -> Result<EngineRegistry> {
        let entries = match store.get(key).await? {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<CustomEngine>(item) {
                    Ok(engine) => Some(engine),
                    Err(e) => {
                        warn!("Ignoring malformed custom engine: {}", e);
                        None
                    }
                })
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                warn!("Stored '{}' is not a list, ignoring: {}", key, other);
                Vec::new()
            }
        };

        let registry = EngineRegistry::from_custom(entries);
        info!("Loaded {} custom search engines", registry.len());
        Ok(registry)
    }

    /// Replace the stored list with `engines`
    pub async fn save(store: &dyn KeyValueStore, key: &str, engines: &[CustomEngine]) -> Result<()> {
        store.set(key, serde_json::to_value(engines)?).await?;
        info!("Saved {} custom search engines", engines.len());
        Ok(())
    }
}
