//! Crop designer service

use crate::error::{AppError, AppResult};
use shared::{
    recommend_crops, validate_rooftop_area, validate_sunlight_hours, CropDesignRequest,
    CropDesignResponse,
};

/// Validate the rooftop description and build a planting plan
pub fn design_crop_plan(request: &CropDesignRequest) -> AppResult<CropDesignResponse> {
    validate_rooftop_area(request.rooftop_area)
        .map_err(|e| AppError::validation("rooftop_area", e))?;
    validate_sunlight_hours(request.sunlight_hours)
        .map_err(|e| AppError::validation("sunlight_hours", e))?;

    tracing::info!(
        "Designing crop plan for {} ({} sqm, {}h sun)",
        request.city,
        request.rooftop_area,
        request.sunlight_hours
    );

    Ok(recommend_crops(
        &request.city,
        request.rooftop_area,
        request.sunlight_hours,
    ))
}
