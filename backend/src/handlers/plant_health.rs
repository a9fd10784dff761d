//! HTTP handler for leaf photo analysis

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::services::plant_health::PlantHealthService;
use crate::AppState;
use shared::PlantHealthResult;

/// Multipart field carrying the photo
pub const UPLOAD_FIELD: &str = "file";

/// Diagnose an uploaded leaf photo
pub async fn analyze_plant_health(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PlantHealthResult>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let image = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidUpload(e.body_text()))?;

        let service = PlantHealthService::from_state(&state);
        let result = service.classify(&image, content_type.as_deref()).await?;
        return Ok(Json(result));
    }

    Err(AppError::InvalidUpload(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}
