//! # The Extraction Orchestrator
//!
//! `AssetExtractor` drives one extraction end to end: build the search query,
//! aggregate search content, then ask the completion provider for a record,
//! retrying with a fixed delay. It always returns a well-formed
//! [`AssetRecord`]; every failure below it degrades to the fallback record.

use crate::{
    aggregate::aggregate_search_content,
    errors::{ExtractError, ResponseError},
    parser::parse_asset_record,
    prompts::{format_extraction_prompt, ASSET_EXTRACTION_SYSTEM_PROMPT, ASSET_EXTRACTION_USER_PROMPT},
    providers::{ai::AiProvider, search::SearchProvider},
    query::build_search_query,
    types::{
        AssetQuery, AssetRecord, ExtractionOptions, ExtractionOutcome, ExtractionReport,
        FallbackReason,
    },
};
use std::fmt;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Why a single extraction attempt did not produce a record.
#[derive(Debug)]
enum AttemptFailure {
    Provider(ExtractError),
    Response(ResponseError),
}

/// Runs the extraction pipeline against a completion and a search provider.
pub struct AssetExtractor {
    pub(crate) ai_provider: Box<dyn AiProvider>,
    pub(crate) search_provider: Box<dyn SearchProvider>,
    pub(crate) options: ExtractionOptions,
    pub(crate) system_prompt: String,
    pub(crate) user_prompt: String,
}

impl fmt::Debug for AssetExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetExtractor")
            .field("ai_provider", &self.ai_provider)
            .field("search_provider", &self.search_provider)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl AssetExtractor {
    pub fn builder() -> AssetExtractorBuilder {
        AssetExtractorBuilder::new()
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Extracts a record for `asset`. Never fails.
    pub async fn extract(&self, asset: &AssetQuery) -> AssetRecord {
        self.extract_with_report(asset).await.record
    }

    /// Extracts a record for `asset` and reports how it was obtained.
    pub async fn extract_with_report(&self, asset: &AssetQuery) -> ExtractionReport {
        let span = info_span!(
            "extract",
            model_number = %asset.model_number(),
            classification = %asset.classification_name()
        );
        self.run(asset).instrument(span).await
    }

    async fn run(&self, asset: &AssetQuery) -> ExtractionReport {
        info!(
            "Processing asset: {} - {}",
            asset.model_number(),
            asset.classification_name()
        );

        // --- Searching ---
        let query = build_search_query(asset);
        let search_content = aggregate_search_content(
            self.search_provider.as_ref(),
            &query,
            self.options.result_limit,
            self.options.max_content_chars,
        )
        .await;

        if search_content.is_empty() {
            warn!("No search content found, using fallback response");
            return self.fallback(asset, 0, FallbackReason::NoSearchContent);
        }

        // --- Extracting ---
        let user_prompt = format_extraction_prompt(
            &self.user_prompt,
            &search_content,
            asset.model_number(),
            asset.classification_name(),
        );
        let max_retries = self.options.max_retries;

        for attempt in 1..=max_retries {
            info!("Extraction attempt {attempt}/{max_retries}");

            match self.attempt(&user_prompt).await {
                Ok(record) => {
                    info!("Successfully extracted asset information on attempt {attempt}");
                    return ExtractionReport {
                        record,
                        attempts: attempt,
                        outcome: ExtractionOutcome::Extracted,
                    };
                }
                Err(AttemptFailure::Response(e)) => {
                    warn!("Extraction failed on attempt {attempt}: {e}");
                }
                Err(AttemptFailure::Provider(e)) if e.is_recoverable() => {
                    warn!("API rate limit/quota exceeded on attempt {attempt}: {e}");
                }
                Err(AttemptFailure::Provider(e)) => {
                    error!("AI provider call failed on attempt {attempt}: {e}");
                    if self.options.abort_on_fatal_error {
                        return self.fallback(asset, attempt, FallbackReason::FatalProviderError);
                    }
                }
            }

            if attempt < max_retries {
                info!("Retrying in {:?}...", self.options.retry_delay);
                tokio::time::sleep(self.options.retry_delay).await;
            }
        }

        warn!("All {max_retries} attempts failed, using fallback response");
        self.fallback(asset, max_retries, FallbackReason::RetriesExhausted)
    }

    async fn attempt(&self, user_prompt: &str) -> Result<AssetRecord, AttemptFailure> {
        debug!(system_prompt = %self.system_prompt, user_prompt = %user_prompt, "--> Sending prompts to AI Provider");

        let output = self
            .ai_provider
            .generate(&self.system_prompt, user_prompt)
            .await
            .map_err(AttemptFailure::Provider)?;

        debug!("<-- Raw AI response shape: {}", output.kind());
        let text = output.into_text();
        parse_asset_record(&text).map_err(AttemptFailure::Response)
    }

    /// The fallback record for `asset` under these options.
    pub fn fallback_record(&self, asset: &AssetQuery) -> AssetRecord {
        AssetRecord::fallback(asset.model_number(), &self.options.fallback_classification)
    }

    fn fallback(&self, asset: &AssetQuery, attempts: u32, reason: FallbackReason) -> ExtractionReport {
        info!(?reason, "Creating fallback response");
        ExtractionReport {
            record: self.fallback_record(asset),
            attempts,
            outcome: ExtractionOutcome::Fallback(reason),
        }
    }
}

/// A builder for creating `AssetExtractor` instances.
#[derive(Default)]
pub struct AssetExtractorBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    search_provider: Option<Box<dyn SearchProvider>>,
    options: ExtractionOptions,
    system_prompt: Option<String>,
    user_prompt: Option<String>,
}

impl AssetExtractorBuilder {
    /// Creates a new `AssetExtractorBuilder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetlens::AssetExtractorBuilder;
    ///
    /// let builder = AssetExtractorBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion provider.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the web search provider.
    pub fn search_provider(mut self, search_provider: Box<dyn SearchProvider>) -> Self {
        self.search_provider = Some(search_provider);
        self
    }

    pub fn options(mut self, options: ExtractionOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides the default system prompt.
    pub fn system_prompt(mut self, system_prompt: String) -> Self {
        self.system_prompt = Some(system_prompt);
        self
    }

    /// Overrides the default user prompt template.
    pub fn user_prompt(mut self, user_prompt: String) -> Self {
        self.user_prompt = Some(user_prompt);
        self
    }

    /// Builds the `AssetExtractor`.
    ///
    /// Fails if either provider is missing.
    pub fn build(self) -> Result<AssetExtractor, ExtractError> {
        let ai_provider = self.ai_provider.ok_or(ExtractError::MissingAiProvider)?;
        let search_provider = self
            .search_provider
            .ok_or(ExtractError::MissingSearchProvider)?;

        Ok(AssetExtractor {
            ai_provider,
            search_provider,
            options: self.options,
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| ASSET_EXTRACTION_SYSTEM_PROMPT.to_string()),
            user_prompt: self
                .user_prompt
                .unwrap_or_else(|| ASSET_EXTRACTION_USER_PROMPT.to_string()),
        })
    }
}
