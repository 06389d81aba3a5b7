//! # Search Content Aggregation
//!
//! Turns the top search hits for an asset into a single bounded block of text
//! that can be embedded in the extraction prompt. Search failures are absorbed
//! here: an unavailable or empty search yields an empty string, which the
//! extractor treats as "no content".

use crate::{
    constants::{RESULT_SEPARATOR, TRUNCATION_MARKER},
    providers::search::SearchProvider,
    types::SearchResult,
};
use tracing::{error, info, warn};

/// Formats results as `Title:`/`Content:` line pairs, each followed by a
/// separator line, joined with newlines.
pub fn format_search_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .flat_map(|result| {
            [
                format!("Title: {}", result.title),
                format!("Content: {}", result.snippet),
                RESULT_SEPARATOR.to_string(),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts `content` to its first `max_chars` characters and appends the
/// truncation marker. Content within the cap is returned unchanged.
pub fn truncate_content(content: String, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = content[..byte_index].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => content,
    }
}

/// Searches for `query` and aggregates up to `limit` results into one string
/// of at most `max_chars` characters (plus the truncation marker).
///
/// Returns an empty string when the provider fails or finds nothing.
pub async fn aggregate_search_content(
    search_provider: &dyn SearchProvider,
    query: &str,
    limit: usize,
    max_chars: usize,
) -> String {
    let results = match search_provider.search(query, limit).await {
        Ok(results) => results,
        Err(e) => {
            error!("Error during web search: {e}");
            return String::new();
        }
    };
    info!("Found {} search results", results.len());

    if results.is_empty() {
        warn!("No search results found");
        return String::new();
    }

    let content = truncate_content(format_search_results(&results), max_chars);
    info!("Extracted {} characters of content", content.chars().count());
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_untouched() {
        assert_eq!(truncate_content("abc".to_string(), 3), "abc");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let content = "ééééé".to_string();
        assert_eq!(truncate_content(content, 2), "éé...");
    }
}
