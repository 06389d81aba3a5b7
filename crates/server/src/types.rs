use serde::{Deserialize, Serialize};

/// The request body for `POST /extract-asset-info`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub model_number: String,
    #[serde(default)]
    pub asset_classification_name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Accepted for compatibility with existing clients; not used by the pipeline.
    #[serde(default)]
    pub asset_classification_guid2: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}
