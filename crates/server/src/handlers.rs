//! # Request Handlers
//!
//! The HTTP surface of the extraction service. Extraction itself never fails
//! once the input is valid: the pipeline answers with a fallback record instead.

use crate::{
    errors::AppError,
    state::AppState,
    types::{ExtractRequest, HealthResponse},
};
use assetlens::{AssetQuery, AssetRecord};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

const SERVICE_NAME: &str = "Asset Information Extraction API";

/// The root handler.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": format!("{SERVICE_NAME} is running") }))
}

/// The health check handler.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// The handler for `POST /extract-asset-info`.
pub async fn extract_asset_info_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<AssetRecord>, AppError> {
    info!(
        provider = %app_state.config.ai.provider,
        "Received extraction request for model '{}' ({})",
        payload.model_number, payload.asset_classification_name
    );

    let query = AssetQuery::new(
        &payload.model_number,
        &payload.asset_classification_name,
        payload.manufacturer.as_deref(),
    )?;

    let report = app_state.extractor.extract_with_report(&query).await;
    info!(
        "Extraction for '{}' finished after {} attempt(s): {:?}",
        query.model_number(),
        report.attempts,
        report.outcome
    );

    Ok(Json(report.record))
}
