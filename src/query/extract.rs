//! Search query extraction from page URLs

use crate::engines::EngineRegistry;
use crate::error::{Error, Result};
use std::borrow::Cow;
use tracing::debug;
use url::Url;

/// Generic parameter names tried when no registered engine yields a query
pub const FALLBACK_PARAMS: &[&str] = &["q", "query", "search", "wd", "word", "text", "keywords"];

/// Extract the search query carried by `url`, if any.
///
/// Parameters registered for the page's hostname are tried first, then the
/// generic fallback names. The first parameter that is present, decodes
/// cleanly and is not blank wins. Unparseable URLs yield `None`.
pub fn extract_query(url: &str, registry: &EngineRegistry) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("{}", Error::from(e));
            return None;
        }
    };

    let hostname = parsed.host_str().unwrap_or_default().to_lowercase();
    let params = QueryParams::parse(parsed.query().unwrap_or_default());

    let candidates = registry.lookup_candidates(&hostname);
    if let Some(query) = first_match(&params, candidates) {
        return Some(query);
    }

    debug!("No registered parameter matched on '{}', trying fallbacks", hostname);
    first_match(&params, FALLBACK_PARAMS.iter().copied())
}

fn first_match<'a>(
    params: &QueryParams<'_>,
    names: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    for name in names {
        let raw = match params.get(name) {
            Some(raw) => raw,
            None => continue,
        };

        match decode_value(name, raw) {
            Ok(value) => {
                let value = value.trim();
                if !value.is_empty() {
                    debug!("Detected query in parameter '{}'", name);
                    return Some(value.to_string());
                }
            }
            Err(e) => debug!("{}", e),
        }
    }
    None
}

/// Query string pairs with decoded keys and raw values
struct QueryParams<'a> {
    pairs: Vec<(String, &'a str)>,
}

impl<'a> QueryParams<'a> {
    fn parse(query: &'a str) -> Self {
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_key(key), value)
            })
            .collect();

        Self { pairs }
    }

    /// Raw value of the first occurrence of `name`
    fn get(&self, name: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }
}

fn decode_key(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Form-decode a parameter value, rejecting malformed escapes and invalid UTF-8
fn decode_value(param: &str, raw: &str) -> Result<String> {
    let raw = raw.replace('+', " ");
    let decode_error = || Error::Decode {
        param: param.to_string(),
    };

    let malformed = raw.match_indices('%').any(|(i, _)| {
        raw.as_bytes()
            .get(i + 1..i + 3)
            .map_or(true, |hex| !hex.iter().all(u8::is_ascii_hexdigit))
    });
    if malformed {
        return Err(decode_error());
    }

    urlencoding::decode(&raw)
        .map(Cow::into_owned)
        .map_err(|_| decode_error())
}
