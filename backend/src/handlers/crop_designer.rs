//! HTTP handler for the crop designer

use axum::Json;

use crate::error::AppResult;
use crate::services::crop_designer;
use shared::{CropDesignRequest, CropDesignResponse};

/// Recommend crops for a rooftop
pub async fn design_crop_plan(
    Json(request): Json<CropDesignRequest>,
) -> AppResult<Json<CropDesignResponse>> {
    let plan = crop_designer::design_crop_plan(&request)?;
    Ok(Json(plan))
}
