//! HTTP request handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::record::ProspectRecord;

use super::error::{ApiError, Result};
use super::state::AppState;

/// Liveness plus the feature names the loaded bundle expects
///
/// Clients use the feature list to discover what a prediction payload
/// may contain; the order is the bundle's declaration order.
pub async fn metadata(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "features": state.bundle.all_features(),
    }))
}

/// Response body for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub probability: f64,
    pub raw_prediction: i64,
}

/// Score a single prospect
///
/// The body must be a JSON object of feature values, either bare or
/// wrapped as `{"data": {...}}`. Absent and uncoercible features degrade
/// to missing rather than failing the request; whether the model can
/// absorb them depends on the bundle's imputation stages.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON payload".to_string()))?;

    // Accept both a bare feature object and one nested under "data"
    let data = payload.get("data").unwrap_or(&payload);

    let record = ProspectRecord::from_payload(data)
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse input: {}", e)))?;
    let frame = record
        .to_dataframe(
            &state.bundle.numeric_features,
            &state.bundle.categorical_features,
        )
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse input: {}", e)))?;

    let pipeline = &state.bundle.pipeline;
    let proba = pipeline
        .predict_proba(&frame)
        .map_err(|e| ApiError::Internal(format!("Prediction failed: {}", e)))?;
    let labels = pipeline
        .predict(&frame)
        .map_err(|e| ApiError::Internal(format!("Prediction failed: {}", e)))?;

    let probability = proba
        .first()
        .copied()
        .ok_or_else(|| ApiError::Internal("Prediction failed: empty result".to_string()))?;
    let raw_prediction = labels
        .first()
        .copied()
        .ok_or_else(|| ApiError::Internal("Prediction failed: empty result".to_string()))?
        as i64;

    let prediction = if raw_prediction == 1 { "yes" } else { "no" };

    info!(
        prediction = prediction,
        probability = probability,
        "Scored prospect"
    );

    Ok(Json(PredictResponse {
        prediction: prediction.to_string(),
        probability,
        raw_prediction,
    }))
}
