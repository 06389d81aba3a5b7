use assetlens::{
    providers::{
        ai::{AiProvider, CompletionOutput},
        search::SearchProvider,
    },
    ExtractError, SearchError, SearchResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the user prompt, such as a model number.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionOutput, ExtractError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((system_prompt.to_string(), user_prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if user_prompt.contains(key) {
                return Ok(CompletionOutput::Text(response.clone()));
            }
        }

        Err(ExtractError::AiApi {
            status: 500,
            body: "MockAiProvider: No response programmed for user prompt.".to_string(),
        })
    }
}

// --- Mock Search Provider ---

#[derive(Clone, Debug)]
pub struct MockSearchProvider {
    results: Arc<Mutex<HashMap<String, Vec<SearchResult>>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(HashMap::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs the results for every query containing `key`.
    pub fn add_results(&self, key: &str, results: Vec<SearchResult>) {
        let mut map = self.results.lock().unwrap();
        map.insert(key.to_string(), results);
    }

    /// Retrieves the recorded queries for assertion.
    pub fn get_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());

        let results = self.results.lock().unwrap();
        Ok(results
            .iter()
            .find(|(key, _)| query.contains(key.as_str()))
            .map(|(_, hits)| hits.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

// --- Test-Specific Helpers ---

/// Builds a search hit with a predictable URL.
pub fn search_result(title: &str, snippet: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        source_url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
    }
}
