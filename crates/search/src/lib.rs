//! # assetlens-search: Web Search Plugin
//!
//! This crate provides the web search provider for the `assetlens` pipeline.
//! It queries DuckDuckGo's HTML endpoint and turns the result page into
//! [`SearchResult`]s, implementing the `SearchProvider` trait.

use assetlens::{providers::search::SearchProvider, SearchError, SearchResult};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// The public DuckDuckGo HTML search host.
pub const DEFAULT_DUCKDUCKGO_URL: &str = "https://html.duckduckgo.com";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// A search provider backed by DuckDuckGo's HTML endpoint.
#[derive(Clone, Debug)]
pub struct DuckDuckGoSearchProvider {
    client: ReqwestClient,
    base_url: String,
}

impl DuckDuckGoSearchProvider {
    /// Creates a provider for the public DuckDuckGo host.
    pub fn new() -> Result<Self, SearchError> {
        Self::with_base_url(DEFAULT_DUCKDUCKGO_URL)
    }

    /// Creates a provider for a custom host, such as a proxy or a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, SearchError> {
        let client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(SearchError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        let search_url = format!("{}/html/", self.base_url);
        info!("Searching DuckDuckGo for: {query}");

        let response = self
            .client
            .post(&search_url)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let results = parse_results(&body, limit)?;
        debug!("Parsed {} DuckDuckGo results", results.len());
        Ok(results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector '{css}': {e}")))
}

/// Parses a DuckDuckGo HTML result page into at most `limit` results.
///
/// Blocks without a title are skipped. Result order follows the page.
pub fn parse_results(html: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let results = document
        .select(&result_sel)
        .filter_map(|block| {
            let link = block.select(&link_sel).next()?;
            let title = collapse_whitespace(&link.text().collect::<String>());
            if title.is_empty() {
                return None;
            }
            let source_url = link
                .value()
                .attr("href")
                .map(resolve_result_url)
                .unwrap_or_default();
            let snippet = block
                .select(&snippet_sel)
                .next()
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
                .unwrap_or_default();
            Some(SearchResult {
                title,
                snippet,
                source_url,
            })
        })
        .take(limit)
        .collect();

    Ok(results)
}

/// DuckDuckGo wraps result links in redirects such as
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Returns the decoded destination, or the link itself when it is not a redirect.
pub fn resolve_result_url(href: &str) -> String {
    let Ok(base) = Url::parse("https://duckduckgo.com/") else {
        return href.to_string();
    };
    match base.join(href) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_else(|| href.to_string()),
        Err(_) => href.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_links_are_decoded() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.cummins.com%2Fgenerators%2Fmrn85hd&rut=abc";
        assert_eq!(
            resolve_result_url(href),
            "https://www.cummins.com/generators/mrn85hd"
        );
    }

    #[test]
    fn direct_links_are_kept() {
        assert_eq!(
            resolve_result_url("https://example.com/spec.pdf"),
            "https://example.com/spec.pdf"
        );
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
