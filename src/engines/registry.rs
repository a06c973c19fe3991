//! Engine registry holding built-in patterns and user-defined engines

use super::builtin::builtin_engines;
use super::types::{CustomEngine, CustomEngineInput, EngineEntry};
use crate::error::{Error, Result, ValidationError};
use tracing::{debug, warn};

/// Registry of known search engine URL patterns
///
/// Built-in entries are never modified. Custom engines overlay them through a
/// derived lookup index that is rebuilt after every mutation, so a built-in
/// domain shadowed by a custom engine comes back once that engine is gone.
#[derive(Debug, Clone)]
pub struct EngineRegistry {
    /// Built-in patterns in registration order
    builtins: Vec<EngineEntry>,
    /// Custom engines in insertion order
    custom: Vec<CustomEngine>,
    /// Built-ins with custom overlays applied, then custom-only domains
    index: Vec<EngineEntry>,
}

impl EngineRegistry {
    /// Create a registry with the built-in table and no custom engines
    pub fn new() -> Self {
        Self::with_builtins(builtin_engines().to_vec())
    }

    /// Create a registry over an explicit built-in table
    pub fn with_builtins(builtins: Vec<EngineEntry>) -> Self {
        let mut registry = Self {
            builtins,
            custom: Vec::new(),
            index: Vec::new(),
        };
        registry.reindex();
        registry
    }

    /// Create a registry from a stored custom engine list.
    ///
    /// Stored entries go through the same validation as user input; invalid
    /// or colliding ones are skipped.
    pub fn from_custom(entries: Vec<CustomEngine>) -> Self {
        let mut registry = Self::new();

        for entry in entries {
            let engine = match CustomEngineInput::from(&entry)
                .normalize()
                .and_then(|engine| registry.check_collision(&engine, None).map(|_| engine))
            {
                Ok(engine) => engine,
                Err(e) => {
                    warn!("Skipping stored custom engine '{}': {}", entry.name, e);
                    continue;
                }
            };
            registry.custom.push(engine);
        }

        registry.reindex();
        registry
    }

    /// Parameter names to try for a lowercased hostname, by priority.
    ///
    /// Every matching custom engine contributes its parameter first, in
    /// insertion order, followed by the parameters of every matching index
    /// entry. A name is listed once, at its first position.
    pub fn lookup_candidates(&self, hostname: &str) -> Vec<&str> {
        let custom = self
            .custom
            .iter()
            .filter(|engine| engine.matches(hostname))
            .map(|engine| engine.param.as_str());

        let indexed = self
            .index
            .iter()
            .filter(|entry| entry.matches(hostname))
            .flat_map(|entry| entry.params.iter().map(String::as_str));

        let mut candidates: Vec<&str> = Vec::new();
        for param in custom.chain(indexed) {
            if !candidates.contains(&param) {
                candidates.push(param);
            }
        }
        candidates
    }

    /// Add a custom engine
    pub fn add_custom(&mut self, input: &CustomEngineInput) -> Result<()> {
        let engine = input.normalize()?;
        self.check_collision(&engine, None)?;

        debug!("Adding custom engine '{}' for {}", engine.name, engine.domain);
        self.custom.push(engine);
        self.reindex();
        Ok(())
    }

    /// Replace the custom engine at `index`
    pub fn update_custom(&mut self, index: usize, input: &CustomEngineInput) -> Result<()> {
        self.ensure_index(index)?;
        let engine = input.normalize()?;
        self.check_collision(&engine, Some(index))?;

        debug!(
            "Updating custom engine {} ('{}' -> '{}')",
            index, self.custom[index].name, engine.name
        );
        self.custom[index] = engine;
        self.reindex();
        Ok(())
    }

    /// Remove the custom engine at `index`, returning it
    pub fn delete_custom(&mut self, index: usize) -> Result<CustomEngine> {
        self.ensure_index(index)?;

        let removed = self.custom.remove(index);
        debug!("Deleted custom engine '{}'", removed.name);
        self.reindex();
        Ok(removed)
    }

    /// Custom engines in insertion order
    pub fn list(&self) -> &[CustomEngine] {
        &self.custom
    }

    /// Get a custom engine by index
    pub fn custom(&self, index: usize) -> Option<&CustomEngine> {
        self.custom.get(index)
    }

    /// Built-in patterns
    pub fn builtins(&self) -> &[EngineEntry] {
        &self.builtins
    }

    /// Number of custom engines
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    /// Check if there are no custom engines
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }

    fn ensure_index(&self, index: usize) -> Result<()> {
        if index >= self.custom.len() {
            return Err(Error::NotFound {
                index,
                len: self.custom.len(),
            });
        }
        Ok(())
    }

    fn check_collision(
        &self,
        engine: &CustomEngine,
        skip: Option<usize>,
    ) -> std::result::Result<(), ValidationError> {
        for (i, existing) in self.custom.iter().enumerate() {
            if Some(i) == skip {
                continue;
            }
            if existing.name == engine.name {
                return Err(ValidationError::DuplicateName(engine.name.clone()));
            }
            if existing.domain == engine.domain {
                return Err(ValidationError::DuplicateDomain(engine.domain.clone()));
            }
        }
        Ok(())
    }

    /// Rebuild the lookup index from the built-ins and the custom list
    fn reindex(&mut self) {
        let overlay = |engine: &CustomEngine| {
            EngineEntry::new(engine.domain.clone(), [engine.param.clone()])
        };

        let mut index: Vec<EngineEntry> = self
            .builtins
            .iter()
            .map(|entry| {
                self.custom
                    .iter()
                    .find(|engine| engine.domain == entry.domain)
                    .map(overlay)
                    .unwrap_or_else(|| entry.clone())
            })
            .collect();

        index.extend(
            self.custom
                .iter()
                .filter(|engine| !self.builtins.iter().any(|e| e.domain == engine.domain))
                .map(overlay),
        );

        self.index = index;
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kagi() -> CustomEngineInput {
        CustomEngineInput::new("Kagi", "https://kagi.com/search?q={query}", "kagi.com", "q")
    }

    #[test]
    fn test_builtin_candidates() {
        let registry = EngineRegistry::new();
        assert_eq!(registry.lookup_candidates("www.baidu.com"), vec!["wd", "word"]);
        assert_eq!(registry.lookup_candidates("yandex.ru"), vec!["text"]);
        assert!(registry.lookup_candidates("example.org").is_empty());
    }

    #[test]
    fn test_all_matching_builtins_contribute() {
        // "so.com" is a substring of "soso.com"
        let registry = EngineRegistry::new();
        assert_eq!(registry.lookup_candidates("www.soso.com"), vec!["q", "w"]);
    }

    #[test]
    fn test_custom_before_builtin() {
        let mut registry = EngineRegistry::new();
        registry
            .add_custom(&CustomEngineInput::new(
                "Scholar",
                "https://scholar.google.com/scholar?q=",
                "scholar.google.com",
                "as_q",
            ))
            .unwrap();

        assert_eq!(
            registry.lookup_candidates("scholar.google.com"),
            vec!["as_q", "q"]
        );
    }

    #[test]
    fn test_custom_insertion_order() {
        let mut registry = EngineRegistry::new();
        registry
            .add_custom(&CustomEngineInput::new("A", "https://a/?x=", "example.com", "first"))
            .unwrap();
        registry
            .add_custom(&CustomEngineInput::new("B", "https://b/?y=", "www.example", "second"))
            .unwrap();

        assert_eq!(
            registry.lookup_candidates("www.example.com"),
            vec!["first", "second"]
        );
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut registry = EngineRegistry::new();
        registry.add_custom(&kagi()).unwrap();

        let same_domain = CustomEngineInput::new("Kagi 2", "https://kagi.com/?q=", "kagi.com", "q");
        assert!(matches!(
            registry.add_custom(&same_domain),
            Err(Error::Validation(ValidationError::DuplicateDomain(_)))
        ));

        let same_name = CustomEngineInput::new("Kagi", "https://other/?q=", "other.com", "q");
        assert!(matches!(
            registry.add_custom(&same_name),
            Err(Error::Validation(ValidationError::DuplicateName(_)))
        ));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let mut registry = EngineRegistry::new();
        let input = CustomEngineInput::new("Kagi", "https://kagi.com/?q=", "kagi.com", "   ");
        assert!(matches!(
            registry.add_custom(&input),
            Err(Error::Validation(ValidationError::MissingField("param")))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_update_renames_domain() {
        let mut registry = EngineRegistry::new();
        registry.add_custom(&kagi()).unwrap();

        let renamed = CustomEngineInput::new("Kagi", "https://kagi.eu/?s=", "kagi.eu", "s");
        registry.update_custom(0, &renamed).unwrap();

        assert!(registry.lookup_candidates("kagi.com").is_empty());
        assert_eq!(registry.lookup_candidates("kagi.eu"), vec!["s"]);
        assert_eq!(registry.list()[0].url_template, "https://kagi.eu/?s=");
    }

    #[test]
    fn test_update_excludes_itself_from_collision_check() {
        let mut registry = EngineRegistry::new();
        registry.add_custom(&kagi()).unwrap();
        registry
            .add_custom(&CustomEngineInput::new("Mojeek", "https://mojeek.com/search?q=", "mojeek.com", "q"))
            .unwrap();

        registry.update_custom(0, &kagi().icon("K")).unwrap();
        assert_eq!(registry.list()[0].icon.as_deref(), Some("K"));

        let clash = CustomEngineInput::new("Kagi", "https://kagi.com/?q=", "mojeek.com", "q");
        assert!(matches!(
            registry.update_custom(0, &clash),
            Err(Error::Validation(ValidationError::DuplicateDomain(_)))
        ));
    }

    #[test]
    fn test_update_and_delete_out_of_range() {
        let mut registry = EngineRegistry::new();
        registry.add_custom(&kagi()).unwrap();

        assert!(matches!(
            registry.update_custom(3, &kagi()),
            Err(Error::NotFound { index: 3, len: 1 })
        ));
        assert!(matches!(
            registry.delete_custom(1),
            Err(Error::NotFound { index: 1, len: 1 })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_renumbers_and_drops_candidates() {
        let mut registry = EngineRegistry::new();
        registry.add_custom(&kagi()).unwrap();
        registry
            .add_custom(&CustomEngineInput::new("Mojeek", "https://mojeek.com/search?q=", "mojeek.com", "q"))
            .unwrap();

        let removed = registry.delete_custom(0).unwrap();
        assert_eq!(removed.name, "Kagi");
        assert_eq!(registry.custom(0).map(|e| e.name.as_str()), Some("Mojeek"));
        assert!(registry.lookup_candidates("kagi.com").is_empty());
    }

    #[test]
    fn test_shadowed_builtin_is_restored() {
        let mut registry = EngineRegistry::new();
        registry
            .add_custom(&CustomEngineInput::new(
                "My Google",
                "https://www.google.com/search?hl=en&q=",
                "google.com",
                "as_q",
            ))
            .unwrap();

        // The overlay replaces the built-in list for that exact key
        assert_eq!(registry.lookup_candidates("www.google.com"), vec!["as_q"]);

        registry.delete_custom(0).unwrap();
        assert_eq!(registry.lookup_candidates("www.google.com"), vec!["q"]);
        assert_eq!(registry.builtins().len(), builtin_engines().len());
    }

    #[test]
    fn test_from_custom_skips_invalid_entries() {
        let stored = vec![
            kagi().normalize().unwrap(),
            CustomEngine {
                name: "Kagi".to_string(),
                icon: Some(String::new()),
                url_template: "https://dup/?q=".to_string(),
                domain: "dup.com".to_string(),
                param: "q".to_string(),
            },
            CustomEngine {
                name: "Broken".to_string(),
                icon: Some(String::new()),
                url_template: String::new(),
                domain: "broken.com".to_string(),
                param: "q".to_string(),
            },
        ];

        let registry = EngineRegistry::from_custom(stored);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup_candidates("kagi.com"), vec!["q"]);
    }
}
