//! A single popup invocation: detect the query, switch engines, manage custom engines

use crate::config::Settings;
use crate::engines::{CustomEngine, CustomEngineInput, EngineLoader, EngineRegistry, TargetEngine};
use crate::error::{Error, Result};
use crate::query::{build_search_url, extract_query};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

/// State for one invocation against the current page.
///
/// The registry is loaded once when the session opens and the page query is
/// detected once. Every mutation is applied to a copy of the registry, saved,
/// and only then replaces the live registry, so a failed write changes nothing.
pub struct SearchSession {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    registry: EngineRegistry,
    targets: Vec<TargetEngine>,
    query: Option<String>,
}

impl SearchSession {
    /// Load the registry from `store` and detect the query on `page_url`
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        settings: &Settings,
        page_url: &str,
    ) -> Result<Self> {
        let registry = EngineLoader::load(store.as_ref(), &settings.storage.key).await?;
        let query = extract_query(page_url, &registry);

        match &query {
            Some(query) => info!("Current search: \"{}\"", query),
            None => info!("No search query detected on {}", page_url),
        }

        Ok(Self {
            store,
            storage_key: settings.storage.key.clone(),
            registry,
            targets: settings.targets.clone(),
            query,
        })
    }

    /// The query detected on the page
    pub fn current_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Custom engines in display order
    pub fn custom_engines(&self) -> &[CustomEngine] {
        self.registry.list()
    }

    /// Every engine the query can be switched to: configured targets, then custom engines
    pub fn targets(&self) -> Vec<TargetEngine> {
        self.targets
            .iter()
            .cloned()
            .chain(self.registry.list().iter().map(TargetEngine::from))
            .collect()
    }

    /// Destination URL for the current query on an engine template
    pub fn destination(&self, template: &str) -> Result<String> {
        let query = self.query.as_deref().ok_or(Error::NoQuery)?;
        Ok(build_search_url(template, query))
    }

    /// Destination URL for the current query on the target named `name`
    pub fn switch_to(&self, name: &str) -> Result<String> {
        let target = self
            .targets()
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTarget(name.to_string()))?;

        if target.url.trim().is_empty() {
            return Err(Error::InvalidTemplate(target.name));
        }

        let url = self.destination(&target.url)?;
        info!("Switching to {}: {}", target.name, url);
        Ok(url)
    }

    /// Form fields for editing the custom engine at `index`
    pub fn edit_input(&self, index: usize) -> Result<CustomEngineInput> {
        self.registry
            .custom(index)
            .map(CustomEngineInput::from)
            .ok_or(Error::NotFound {
                index,
                len: self.registry.len(),
            })
    }

    pub async fn add_custom(&mut self, input: &CustomEngineInput) -> Result<()> {
        let mut next = self.registry.clone();
        next.add_custom(input)?;
        self.commit(next).await?;

        info!("Added custom search engine '{}'", input.name.trim());
        Ok(())
    }

    pub async fn update_custom(&mut self, index: usize, input: &CustomEngineInput) -> Result<()> {
        let mut next = self.registry.clone();
        next.update_custom(index, input)?;
        self.commit(next).await?;

        info!("Updated custom search engine '{}'", input.name.trim());
        Ok(())
    }

    pub async fn delete_custom(&mut self, index: usize) -> Result<CustomEngine> {
        let mut next = self.registry.clone();
        let removed = next.delete_custom(index)?;
        self.commit(next).await?;

        info!("Deleted custom search engine '{}'", removed.name);
        Ok(removed)
    }

    async fn commit(&mut self, next: EngineRegistry) -> Result<()> {
        if let Err(e) = EngineLoader::save(self.store.as_ref(), &self.storage_key, next.list()).await {
            warn!("Failed to save custom search engines: {}", e);
            return Err(e);
        }
        self.registry = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use serde_json::Value;

    /// Store whose writes always fail
    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: Value) -> Result<()> {
            Err(Error::Storage("read-only".to_string()))
        }
    }

    fn kagi() -> CustomEngineInput {
        CustomEngineInput::new("Kagi", "https://kagi.com/search?q={query}", "kagi.com", "q").icon("K")
    }

    async fn open(store: Arc<dyn KeyValueStore>, url: &str) -> SearchSession {
        SearchSession::open(store, &Settings::default(), url).await.unwrap()
    }

    #[tokio::test]
    async fn test_switch_to_builtin_target() {
        let session = open(
            Arc::new(MemoryStore::new()),
            "https://www.google.com/search?q=rust+tutorial",
        )
        .await;

        assert_eq!(session.current_query(), Some("rust tutorial"));
        assert_eq!(
            session.switch_to("Bing").unwrap(),
            "https://www.bing.com/search?q=rust%20tutorial"
        );
        assert!(matches!(
            session.switch_to("Nope"),
            Err(Error::UnknownTarget(_))
        ));
    }

    #[tokio::test]
    async fn test_switch_without_query() {
        let session = open(Arc::new(MemoryStore::new()), "https://example.org/about").await;

        assert_eq!(session.current_query(), None);
        assert!(matches!(session.switch_to("Bing"), Err(Error::NoQuery)));
        assert!(matches!(session.destination("https://x/?q="), Err(Error::NoQuery)));
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let store = Arc::new(MemoryStore::new());
        let mut session = open(store.clone(), "https://kagi.com/search?q=rust").await;

        session.add_custom(&kagi()).await.unwrap();
        assert_eq!(
            session.switch_to("Kagi").unwrap(),
            "https://kagi.com/search?q=rust"
        );

        let reopened = open(store.clone(), "https://kagi.com/search?q=rust").await;
        assert_eq!(reopened.custom_engines(), session.custom_engines());
        assert_eq!(reopened.targets().last().map(|t| t.icon.as_str()), Some("K"));

        let mut edited = session.edit_input(0).unwrap();
        edited.name = "Kagi Search".to_string();
        session.update_custom(0, &edited).await.unwrap();

        let removed = session.delete_custom(0).await.unwrap();
        assert_eq!(removed.name, "Kagi Search");

        let reopened = open(store, "https://kagi.com/search?q=rust").await;
        assert!(reopened.custom_engines().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_mutation_is_not_saved() {
        let store = Arc::new(MemoryStore::new());
        let mut session = open(store.clone(), "https://example.org/").await;
        session.add_custom(&kagi()).await.unwrap();

        let duplicate = CustomEngineInput::new("Other", "https://o/?q=", "kagi.com", "q");
        assert!(matches!(
            session.add_custom(&duplicate).await,
            Err(Error::Validation(ValidationError::DuplicateDomain(_)))
        ));
        assert!(matches!(
            session.delete_custom(5).await,
            Err(Error::NotFound { index: 5, len: 1 })
        ));

        let reopened = open(store, "https://example.org/").await;
        assert_eq!(reopened.custom_engines().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_previous_state() {
        let mut session = open(Arc::new(ReadOnlyStore), "https://example.org/").await;

        assert!(matches!(
            session.add_custom(&kagi()).await,
            Err(Error::Storage(_))
        ));
        assert!(session.custom_engines().is_empty());
        assert!(session.registry().lookup_candidates("kagi.com").is_empty());
    }
}
