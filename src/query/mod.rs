//! Query detection and re-rendering
//!
//! Extracts the search terms from a page URL and renders them into another
//! engine's URL template. Both directions use the same percent-encoding.

mod build;
mod extract;

pub use build::{build_search_url, QUERY_PLACEHOLDER};
pub use extract::{extract_query, FALLBACK_PARAMS};
