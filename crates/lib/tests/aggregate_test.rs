//! # Content Aggregation Tests
//!
//! Covers formatting of search results, the character cap with its trailing
//! marker, and absorption of search failures.

mod common;

use assetlens::{
    aggregate::{aggregate_search_content, format_search_results, truncate_content},
    constants::{MAX_CONTENT_CHARS, TRUNCATION_MARKER},
};
use common::{generator_results, search_result, setup_tracing, MockSearchProvider};

#[test]
fn test_results_are_formatted_in_provider_order() {
    let formatted = format_search_results(&generator_results());

    assert_eq!(
        formatted,
        "Title: Cummins MRN85HD Marine Generator\n\
         Content: 85 kW, 60 Hz, heat exchanger cooled diesel generator set.\n\
         ---\n\
         Title: Onan MRN85HD Specification Sheet\n\
         Content: Prime power rating 85 kWe at 1800 rpm, QSB5 engine.\n\
         ---"
    );
}

#[test]
fn test_content_over_the_cap_keeps_exactly_the_cap_plus_marker() {
    let content = "x".repeat(MAX_CONTENT_CHARS + 400);

    let truncated = truncate_content(content, MAX_CONTENT_CHARS);

    assert_eq!(
        truncated.chars().count(),
        MAX_CONTENT_CHARS + TRUNCATION_MARKER.chars().count()
    );
    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert!(truncated[..MAX_CONTENT_CHARS].chars().all(|c| c == 'x'));
}

#[test]
fn test_content_at_the_cap_is_not_marked() {
    let content = "y".repeat(MAX_CONTENT_CHARS);

    let truncated = truncate_content(content.clone(), MAX_CONTENT_CHARS);

    assert_eq!(truncated, content);
}

#[tokio::test]
async fn test_aggregation_requests_the_limit_and_formats_results() {
    setup_tracing();
    let provider = MockSearchProvider::with_results(generator_results());

    let content =
        aggregate_search_content(&provider, "MRN85HD Generator specifications", 5, 2500).await;

    assert!(content.starts_with("Title: Cummins MRN85HD Marine Generator\n"));
    assert!(content.ends_with("---"));
    assert_eq!(
        provider.calls(),
        vec![("MRN85HD Generator specifications".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_long_aggregation_is_truncated() {
    setup_tracing();
    let results = (0..5)
        .map(|i| search_result(&format!("Result {i}"), &"spec ".repeat(200)))
        .collect();
    let provider = MockSearchProvider::with_results(results);

    let content = aggregate_search_content(&provider, "q", 5, MAX_CONTENT_CHARS).await;

    assert_eq!(content.chars().count(), MAX_CONTENT_CHARS + 3);
    assert!(content.ends_with("..."));
}

#[tokio::test]
async fn test_empty_search_yields_empty_content() {
    setup_tracing();
    let provider = MockSearchProvider::with_results(vec![]);

    let content = aggregate_search_content(&provider, "q", 5, MAX_CONTENT_CHARS).await;

    assert!(content.is_empty());
}

#[tokio::test]
async fn test_search_failure_is_absorbed() {
    setup_tracing();
    let provider = MockSearchProvider::failing();

    let content = aggregate_search_content(&provider, "q", 5, MAX_CONTENT_CHARS).await;

    assert!(content.is_empty());
    assert_eq!(provider.calls().len(), 1);
}
