//! Built-in search engine URL patterns

use super::types::EngineEntry;
use once_cell::sync::Lazy;

/// Known engines in registration order, with their query parameters by priority
const BUILTIN_PATTERNS: &[(&str, &[&str])] = &[
    // International
    ("google.com", &["q"]),
    ("google.co.uk", &["q"]),
    ("google.ca", &["q"]),
    ("google.com.au", &["q"]),
    ("bing.com", &["q"]),
    ("duckduckgo.com", &["q"]),
    ("yandex.com", &["text"]),
    ("yandex.ru", &["text"]),
    ("ecosia.org", &["q"]),
    ("startpage.com", &["query"]),
    ("searx.me", &["q"]),
    // Code
    ("github.com", &["q"]),
    // Chinese
    ("baidu.com", &["wd", "word"]),
    ("sogou.com", &["query"]),
    ("so.com", &["q"]),
    ("soso.com", &["w"]),
    ("360.cn", &["q"]),
    ("sm.cn", &["q"]),
    // Others
    ("yahoo.com", &["p"]),
    ("ask.com", &["q"]),
    ("aol.com", &["q"]),
];

static BUILTIN_ENGINES: Lazy<Vec<EngineEntry>> = Lazy::new(|| {
    BUILTIN_PATTERNS
        .iter()
        .map(|(domain, params)| EngineEntry::new(*domain, params.iter().copied()))
        .collect()
});

/// The built-in engine table
pub fn builtin_engines() -> &'static [EngineEntry] {
    &BUILTIN_ENGINES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_domains_are_unique() {
        let engines = builtin_engines();
        for (i, entry) in engines.iter().enumerate() {
            assert!(!entry.params.is_empty(), "{} has no params", entry.domain);
            assert!(
                engines[i + 1..].iter().all(|e| e.domain != entry.domain),
                "duplicate domain {}",
                entry.domain
            );
        }
    }

    #[test]
    fn test_baidu_param_order() {
        let baidu = builtin_engines()
            .iter()
            .find(|e| e.domain == "baidu.com")
            .unwrap();
        assert_eq!(baidu.params, vec!["wd", "word"]);
    }
}
