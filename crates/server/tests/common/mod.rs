//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, backed by the mock
//! providers from `assetlens-test-utils` so that no request leaves the machine.

// Not every helper is used by every test file that includes this module.
#![allow(unused)]

use anyhow::Result;
use assetlens_server::{
    config::{AiConfig, AppConfig, ExtractionConfig, LoggingConfig, SearchConfig},
    router::create_router,
    state::build_app_state_with_providers,
};
use assetlens_test_utils::{search_result, MockAiProvider, MockSearchProvider};
use axum::serve;
use reqwest::Client;
use std::{collections::HashMap, net::SocketAddr};
use tokio::{net::TcpListener, task::JoinHandle};

pub const VALID_RESPONSE: &str = r#"Here you go:
{"asset_classification":"Generator (Marine)","manufacturer":"Cummins","model_number":"MRN85HD","product_line":"Onan","summary":"An 85 kW marine diesel generator."}"#;

/// A configuration that never sleeps between attempts.
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        ai: AiConfig {
            provider: "local".to_string(),
            api_url: Some("http://localhost".to_string()),
            api_key: None,
            model_name: None,
        },
        search: SearchConfig::default(),
        extraction: ExtractionConfig {
            retry_delay_secs: 0,
            ..Default::default()
        },
        logging: LoggingConfig { file: None },
        tasks: HashMap::new(),
    }
}

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub ai: MockAiProvider,
    pub search: MockSearchProvider,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the default test configuration.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_config(test_config()).await
    }

    pub async fn spawn_with_config(config: AppConfig) -> Result<Self> {
        dotenvy::dotenv().ok();
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        // The mocks share their state with the clones handed to the server.
        let ai = MockAiProvider::new();
        let search = MockSearchProvider::new();
        search.add_results(
            "MRN85HD",
            vec![
                search_result(
                    "Cummins Onan MRN85HD",
                    "85 kW marine diesel generator set.",
                ),
                search_result("MRN85HD Spec Sheet", "Prime rating 85 kWe at 1800 rpm."),
            ],
        );

        let app_state = build_app_state_with_providers(
            config,
            Box::new(ai.clone()),
            Box::new(search.clone()),
        )?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            ai,
            search,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn post_extract(&self, body: serde_json::Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/extract-asset-info", self.address))
            .json(&body)
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked.
            let _ = tx.send(());
        }
    }
}

/// Spawns the server with the real DuckDuckGo and local completion providers,
/// both pointed at `mock_server`.
pub async fn spawn_with_real_providers(mock_server: &httpmock::MockServer) -> Result<String> {
    let mut config = test_config();
    config.ai.api_url = Some(mock_server.url("/v1/chat/completions"));
    config.search.base_url = mock_server.base_url();

    let app_state = assetlens_server::state::build_app_state(config)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        let app = create_router(app_state);
        if let Err(e) = serve(listener, app).await {
            tracing::error!("[TestApp] Server error: {}", e);
        }
    });

    Ok(address)
}
