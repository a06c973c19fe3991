//! Settings structures for PowerSearch configuration

use crate::engines::TargetEngine;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub storage: StorageSettings,
    /// Engines the current query can be switched to, in display order
    pub targets: Vec<TargetEngine>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            storage: StorageSettings::default(),
            targets: default_targets(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (POWERSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("POWERSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("POWERSEARCH_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("POWERSEARCH_STORAGE_KEY") {
            if !val.trim().is_empty() {
                self.storage.key = val;
            }
        }
    }

    /// Get a switch target by name
    pub fn get_target(&self, name: &str) -> Option<&TargetEngine> {
        self.targets.iter().find(|t| t.name == name)
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Where custom engines are persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Storage file (none = platform data directory)
    pub path: Option<PathBuf>,
    /// Key holding the custom engine list
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: None,
            key: "customEngines".to_string(),
        }
    }
}

impl StorageSettings {
    /// Effective storage file path
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("powersearch")
                .join("storage.json")
        })
    }
}

/// Default switch targets
fn default_targets() -> Vec<TargetEngine> {
    vec![
        TargetEngine::new("Google", "G", "https://www.google.com/search?q={query}"),
        TargetEngine::new("Bing", "B", "https://www.bing.com/search?q={query}"),
        TargetEngine::new("DuckDuckGo", "D", "https://duckduckgo.com/?q={query}"),
        TargetEngine::new("Baidu", "百", "https://www.baidu.com/s?wd={query}"),
        TargetEngine::new("Yandex", "Y", "https://yandex.com/search/?text={query}"),
        TargetEngine::new("Sogou", "搜", "https://www.sogou.com/web?query={query}"),
        TargetEngine::new("GitHub", "🐙", "https://github.com/search?q={query}"),
        TargetEngine::new("Startpage", "S", "https://www.startpage.com/do/search?query={query}"),
    ]
}
