//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration and the
//! fully wired extraction pipeline, making them accessible to all request handlers.

use crate::config::{AppConfig, ASSET_EXTRACTION_TASK};
use assetlens::{
    providers::{
        ai::AiProvider,
        factory::{create_ai_provider, AiProviderSettings},
        search::SearchProvider,
    },
    AssetExtractor,
};
use assetlens_search::DuckDuckGoSearchProvider;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The extraction pipeline, shared by all requests.
    pub extractor: Arc<AssetExtractor>,
}

/// Builds the shared application state from the configuration.
///
/// The completion provider is created from the `ai` section and the search
/// provider points at the configured DuckDuckGo host.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let settings = AiProviderSettings {
        provider: config.ai.provider.clone(),
        api_url: config.ai.api_url.clone(),
        api_key: config.ai.api_key.clone(),
        model_name: config.ai.model_name.clone(),
    };
    let ai_provider = create_ai_provider(&settings)?;
    let search_provider = Box::new(DuckDuckGoSearchProvider::with_base_url(
        &config.search.base_url,
    )?);

    build_app_state_with_providers(config, ai_provider, search_provider)
}

/// Builds the application state around already constructed providers.
pub fn build_app_state_with_providers(
    config: AppConfig,
    ai_provider: Box<dyn AiProvider>,
    search_provider: Box<dyn SearchProvider>,
) -> anyhow::Result<AppState> {
    let mut builder = AssetExtractor::builder()
        .ai_provider(ai_provider)
        .search_provider(search_provider)
        .options(config.extraction_options());

    if let Some(task) = config.tasks.get(ASSET_EXTRACTION_TASK) {
        if let Some(system_prompt) = &task.system_prompt {
            builder = builder.system_prompt(system_prompt.clone());
        }
        if let Some(user_prompt) = &task.user_prompt {
            builder = builder.user_prompt(user_prompt.clone());
        }
    }

    let extractor = builder.build()?;
    info!(
        "Extraction pipeline ready (provider: {}, max retries: {})",
        config.ai.provider, config.extraction.max_retries
    );

    Ok(AppState {
        config: Arc::new(config),
        extractor: Arc::new(extractor),
    })
}
