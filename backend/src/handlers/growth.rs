//! HTTP handler for growth prediction

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::growth::GrowthService;
use crate::AppState;
use shared::{GrowthPrediction, GrowthPredictionRequest};

/// Predict yield and harvest date for a crop
pub async fn predict_growth(
    State(state): State<AppState>,
    Json(request): Json<GrowthPredictionRequest>,
) -> AppResult<Json<GrowthPrediction>> {
    let service = GrowthService::new(state.weather);
    let prediction = service.predict(&request)?;
    Ok(Json(prediction))
}
