//! Search URL building

/// Token replaced by the encoded query in URL templates
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Render `query` into an engine URL template.
///
/// The first `{query}` is replaced by the percent-encoded query. Templates
/// without a placeholder get the encoded query appended as-is, so they are
/// expected to end with something like `?q=`.
pub fn build_search_url(template: &str, query: &str) -> String {
    let encoded = urlencoding::encode(query);
    if template.contains(QUERY_PLACEHOLDER) {
        template.replacen(QUERY_PLACEHOLDER, &encoded, 1)
    } else {
        format!("{}{}", template, encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        assert_eq!(
            build_search_url("https://www.bing.com/search?q={query}", "rust tutorial"),
            "https://www.bing.com/search?q=rust%20tutorial"
        );
    }

    #[test]
    fn test_only_first_placeholder_replaced() {
        assert_eq!(
            build_search_url("https://x.test/{query}?q={query}", "a"),
            "https://x.test/a?q={query}"
        );
    }

    #[test]
    fn test_prefix_template() {
        assert_eq!(
            build_search_url("https://www.baidu.com/s?wd=", "rust"),
            "https://www.baidu.com/s?wd=rust"
        );
    }

    #[test]
    fn test_reserved_and_non_ascii_characters() {
        let url = build_search_url("https://x.test/?q=", "a&b=c #d/e?f 你");
        assert_eq!(
            url,
            "https://x.test/?q=a%26b%3Dc%20%23d%2Fe%3Ff%20%E4%BD%A0"
        );
    }
}
