#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Scripted providers for exercising the extraction pipeline without any
//! network access.

use assetlens::{
    providers::{
        ai::{AiProvider, CompletionOutput},
        search::SearchProvider,
    },
    ExtractError, SearchError, SearchResult,
};
use async_trait::async_trait;
use dotenvy::dotenv;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A well-formed response carrying all five fields.
pub const VALID_RESPONSE: &str = r#"{"asset_classification":"Generator (Marine)","manufacturer":"Cummins","model_number":"MRN85HD","product_line":"Onan","summary":"An 85 kW marine diesel generator."}"#;

// --- Mock AI Provider ---

/// One scripted reply from the mock completion provider.
#[derive(Clone, Debug)]
pub enum MockReply {
    Text(String),
    Message(String),
    RateLimited,
    Fatal,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    repeat: Option<MockReply>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    /// Replies with `replies` in order, then fails every further call.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            repeat: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replies with `reply` on every call.
    pub fn always(reply: MockReply) -> Self {
        Self {
            repeat: Some(reply),
            ..Self::new(vec![])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionOutput, ExtractError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.repeat.clone())
            .unwrap_or(MockReply::Fatal);

        match reply {
            MockReply::Text(text) => Ok(CompletionOutput::Text(text)),
            MockReply::Message(content) => Ok(CompletionOutput::Message {
                role: "assistant".to_string(),
                content,
            }),
            MockReply::RateLimited => Err(ExtractError::RateLimited(
                "429 Resource has been exhausted (e.g. check quota).".to_string(),
            )),
            MockReply::Fatal => Err(ExtractError::AiApi {
                status: 500,
                body: "Internal error encountered.".to_string(),
            }),
        }
    }
}

// --- Mock Search Provider ---

#[derive(Clone, Debug)]
pub struct MockSearchProvider {
    results: Option<Vec<SearchResult>>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MockSearchProvider {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results: Some(results),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every search fails.
    pub fn failing() -> Self {
        Self {
            results: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        match &self.results {
            Some(results) => Ok(results.iter().take(limit).cloned().collect()),
            None => Err(SearchError::Api {
                status: 503,
                body: "search unavailable".to_string(),
            }),
        }
    }
}

pub fn search_result(title: &str, snippet: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        source_url: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
    }
}

/// A couple of realistic results for the MRN85HD generator.
pub fn generator_results() -> Vec<SearchResult> {
    vec![
        search_result(
            "Cummins MRN85HD Marine Generator",
            "85 kW, 60 Hz, heat exchanger cooled diesel generator set.",
        ),
        search_result(
            "Onan MRN85HD Specification Sheet",
            "Prime power rating 85 kWe at 1800 rpm, QSB5 engine.",
        ),
    ]
}
