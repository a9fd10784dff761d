//! Growth prediction service

use chrono::Utc;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::services::weather::WeatherSimulator;
use shared::{
    build_growth_prediction, lookup_crop, parse_planting_date, validate_rooftop_area,
    GrowthPrediction, GrowthPredictionRequest,
};

/// Predicts yield and harvest timing from the crop knowledge base
#[derive(Clone)]
pub struct GrowthService {
    weather: Arc<WeatherSimulator>,
}

impl GrowthService {
    /// Create a new GrowthService instance
    pub fn new(weather: Arc<WeatherSimulator>) -> Self {
        Self { weather }
    }

    pub fn predict(&self, request: &GrowthPredictionRequest) -> AppResult<GrowthPrediction> {
        validate_rooftop_area(request.rooftop_area)
            .map_err(|e| AppError::validation("rooftop_area", e))?;

        let planted_at = match parse_planting_date(&request.planting_date) {
            Some(date) => date,
            None => {
                tracing::debug!(
                    "Unparseable planting date '{}', using now",
                    request.planting_date
                );
                Utc::now().fixed_offset()
            }
        };

        let profile = lookup_crop(&request.crop);
        if !profile.name.eq_ignore_ascii_case(request.crop.trim()) {
            tracing::debug!("Unknown crop '{}', using {}", request.crop, profile.name);
        }

        let forecast = self.weather.forecast_from(
            &request.location,
            planted_at.date_naive(),
            profile.harvest_days,
        );

        Ok(build_growth_prediction(
            profile,
            &request.crop,
            &request.location,
            request.rooftop_area,
            planted_at,
            &forecast,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(crop: &str, planting_date: &str, rooftop_area: f64) -> GrowthPredictionRequest {
        GrowthPredictionRequest {
            crop: crop.to_string(),
            planting_date: planting_date.to_string(),
            location: "Bangkok".to_string(),
            rooftop_area,
        }
    }

    #[test]
    fn test_tomato_timeline() {
        let service = GrowthService::new(Arc::new(WeatherSimulator::new()));
        let prediction = service
            .predict(&request("Tomato", "2024-03-01T00:00:00Z", 10.0))
            .unwrap();

        assert_eq!(prediction.crop, "tomato");
        assert_eq!(prediction.estimated_yield, "80.0 kg");
        assert_eq!(prediction.harvest_days, 75);
        assert_eq!(prediction.harvest_date, "2024-05-15T00:00:00+00:00");
    }

    #[test]
    fn test_bad_date_still_predicts() {
        let service = GrowthService::new(Arc::new(WeatherSimulator::new()));
        let before = Utc::now();
        let prediction = service.predict(&request("basil", "soon", 2.0)).unwrap();
        assert_eq!(prediction.harvest_days, 30);
        assert_eq!(prediction.estimated_yield, "2.4 kg");

        // planted now, so harvest is 30 days out
        let harvest = chrono::DateTime::parse_from_rfc3339(&prediction.harvest_date).unwrap();
        let days = (harvest.with_timezone(&Utc) - before).num_days();
        assert!((29..=30).contains(&days));
    }

    #[test]
    fn test_rejects_negative_area() {
        let service = GrowthService::new(Arc::new(WeatherSimulator::new()));
        assert!(service.predict(&request("mint", "2024-03-01", -1.0)).is_err());
    }
}
