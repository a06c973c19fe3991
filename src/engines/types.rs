//! Engine definitions: built-in patterns, user-defined engines and switch targets

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Glyph shown for engines that do not define their own icon
pub const DEFAULT_ICON: &str = "🔍";

/// Built-in search engine URL pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEntry {
    /// Substring matched against the lowercased hostname
    pub domain: String,
    /// Query parameter names, tried in order
    pub params: Vec<String>,
}

impl EngineEntry {
    pub fn new<I, S>(domain: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domain: domain.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this entry applies to the given (lowercased) hostname
    pub fn matches(&self, hostname: &str) -> bool {
        hostname.contains(self.domain.as_str())
    }
}

/// A search engine added by the user
///
/// Field names on the wire follow the stored format (`url` holds the template).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEngine {
    /// Display name, unique among custom engines
    pub name: String,
    /// Optional display glyph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// URL template, either containing `{query}` or ending in a prefix like `?q=`
    #[serde(rename = "url")]
    pub url_template: String,
    /// Hostname substring, unique among custom engines
    pub domain: String,
    /// Query parameter carrying the search terms
    pub param: String,
}

impl CustomEngine {
    pub fn matches(&self, hostname: &str) -> bool {
        hostname.contains(self.domain.as_str())
    }

    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_ICON)
    }
}

/// Raw form fields for adding or editing a custom engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomEngineInput {
    pub name: String,
    pub icon: String,
    pub url: String,
    pub domain: String,
    pub param: String,
}

impl CustomEngineInput {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        domain: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            icon: String::new(),
            url: url.into(),
            domain: domain.into(),
            param: param.into(),
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Trim every field and check that the required ones are present.
    ///
    /// Collisions with other engines are checked by the registry.
    pub fn normalize(&self) -> Result<CustomEngine, ValidationError> {
        let name = required("name", &self.name)?;
        let url_template = required("url", &self.url)?;
        let domain = required("domain", &self.domain)?;
        let param = required("param", &self.param)?;
        let icon = match self.icon.trim() {
            "" => None,
            icon => Some(icon.to_string()),
        };

        Ok(CustomEngine {
            name,
            icon,
            url_template,
            domain,
            param,
        })
    }
}

impl From<&CustomEngine> for CustomEngineInput {
    fn from(engine: &CustomEngine) -> Self {
        Self {
            name: engine.name.clone(),
            icon: engine.icon.clone().unwrap_or_default(),
            url: engine.url_template.clone(),
            domain: engine.domain.clone(),
            param: engine.param.clone(),
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

/// An engine the user can switch the current query to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetEngine {
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// URL template for the destination
    pub url: String,
}

impl TargetEngine {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            url: url.into(),
        }
    }
}

impl From<&CustomEngine> for TargetEngine {
    fn from(engine: &CustomEngine) -> Self {
        Self {
            name: engine.name.clone(),
            icon: engine.icon_or_default().to_string(),
            url: engine.url_template.clone(),
        }
    }
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}
