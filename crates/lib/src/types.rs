use crate::{constants, errors::ExtractError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The partial identification of an asset supplied by the caller.
///
/// Construct it with [`AssetQuery::new`], which trims every field and rejects
/// an empty model number or classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetQuery {
    model_number: String,
    classification_name: String,
    manufacturer: String,
}

impl AssetQuery {
    pub fn new(
        model_number: &str,
        classification_name: &str,
        manufacturer: Option<&str>,
    ) -> Result<Self, ExtractError> {
        let model_number = model_number.trim();
        let classification_name = classification_name.trim();
        if model_number.is_empty() {
            return Err(ExtractError::InvalidInput(
                "model_number is required".to_string(),
            ));
        }
        if classification_name.is_empty() {
            return Err(ExtractError::InvalidInput(
                "asset_classification_name is required".to_string(),
            ));
        }
        Ok(Self {
            model_number: model_number.to_string(),
            classification_name: classification_name.to_string(),
            manufacturer: manufacturer.unwrap_or_default().trim().to_string(),
        })
    }

    pub fn model_number(&self) -> &str {
        &self.model_number
    }

    pub fn classification_name(&self) -> &str {
        &self.classification_name
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }
}

/// A single hit returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub source_url: String,
}

/// The structured record returned for every extraction request.
///
/// All five fields are always present; unknown values are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetRecord {
    #[serde(rename = "asset_classification")]
    pub classification: String,
    pub manufacturer: String,
    pub model_number: String,
    pub product_line: String,
    pub summary: String,
}

impl AssetRecord {
    /// The deterministic record used when no real extraction is possible.
    pub fn fallback(model_number: &str, classification: &str) -> Self {
        Self {
            classification: classification.to_string(),
            manufacturer: String::new(),
            model_number: model_number.to_string(),
            product_line: String::new(),
            summary: String::new(),
        }
    }
}

/// Tunables for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub result_limit: usize,
    pub max_content_chars: usize,
    pub fallback_classification: String,
    /// Go straight to the fallback record on a non-recoverable provider error
    /// instead of spending the remaining attempts.
    pub abort_on_fatal_error: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_retries: constants::DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(constants::DEFAULT_RETRY_DELAY_SECS),
            result_limit: constants::DEFAULT_RESULT_LIMIT,
            max_content_chars: constants::MAX_CONTENT_CHARS,
            fallback_classification: constants::DEFAULT_FALLBACK_CLASSIFICATION.to_string(),
            abort_on_fatal_error: false,
        }
    }
}

/// Why an extraction ended with the fallback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NoSearchContent,
    RetriesExhausted,
    FatalProviderError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum ExtractionOutcome {
    Extracted,
    Fallback(FallbackReason),
}

/// The record produced by an extraction together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub record: AssetRecord,
    /// Number of completion provider calls made.
    pub attempts: u32,
    pub outcome: ExtractionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_query_trims_and_defaults_manufacturer() {
        let query = AssetQuery::new("  MRN85HD ", " Generator (Marine)", None).unwrap();
        assert_eq!(query.model_number(), "MRN85HD");
        assert_eq!(query.classification_name(), "Generator (Marine)");
        assert_eq!(query.manufacturer(), "");
    }

    #[test]
    fn asset_query_rejects_blank_required_fields() {
        let err = AssetQuery::new("   ", "Generator", None).unwrap_err();
        assert!(err.to_string().contains("model_number is required"));

        let err = AssetQuery::new("MRN85HD", "", Some("Cummins")).unwrap_err();
        assert!(err.to_string().contains("asset_classification_name is required"));
    }

    #[test]
    fn asset_record_uses_wire_names() {
        let record = AssetRecord::fallback("MRN85HD", "Generator");
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["asset_classification"], "Generator");
        assert_eq!(object["model_number"], "MRN85HD");
        assert_eq!(object["summary"], "");
    }
}
