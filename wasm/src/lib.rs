//! WebAssembly module for FarmMind
//!
//! Provides client-side computation for:
//! - Crop plans and yield estimates
//! - Sensor status classification
//! - Offline chat answers
//! - Upload validation and the size-based leaf diagnosis

use wasm_bindgen::prelude::*;

use shared::{
    classify_conditions, classify_sensor_status, format_yield_kg, lookup_crop, recommend_crops,
    smart_response, validate_image_content_type, validate_rooftop_area, validate_sunlight_hours,
};

fn to_js_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

/// Crop plan for a rooftop, as JSON
#[wasm_bindgen]
pub fn design_crop_plan(city: &str, rooftop_area: f64, sunlight_hours: f64) -> Result<String, JsValue> {
    validate_rooftop_area(rooftop_area).map_err(to_js_error)?;
    validate_sunlight_hours(sunlight_hours).map_err(to_js_error)?;

    let plan = recommend_crops(city, rooftop_area, sunlight_hours);
    serde_json::to_string(&plan).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Expected yield, e.g. "80.0 kg"; unknown crops are treated as lettuce
#[wasm_bindgen]
pub fn estimate_yield(crop: &str, rooftop_area: f64) -> String {
    format_yield_kg(rooftop_area * lookup_crop(crop).yield_per_sqm)
}

/// Days from planting to harvest
#[wasm_bindgen]
pub fn harvest_days(crop: &str) -> u32 {
    lookup_crop(crop).harvest_days
}

/// "optimal", "warning" or "critical"
#[wasm_bindgen]
pub fn sensor_status(temperature: f64, humidity: f64, soil_moisture: f64) -> String {
    classify_sensor_status(temperature, humidity, soil_moisture).to_string()
}

/// Sky conditions for a day, as the API names them
#[wasm_bindgen]
pub fn weather_conditions(temperature: f64, rainfall: f64) -> Result<String, JsValue> {
    serde_json::to_value(classify_conditions(temperature, rainfall))
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .ok_or_else(|| to_js_error("Unrepresentable conditions"))
}

/// Keyword answer used when the assistant is offline
#[wasm_bindgen]
pub fn offline_chat_answer(message: &str) -> String {
    smart_response(message).to_string()
}

/// Check a file's MIME type before uploading it
#[wasm_bindgen]
pub fn is_uploadable_image(content_type: &str) -> bool {
    validate_image_content_type(Some(content_type)).is_ok()
}

/// Size-based placeholder diagnosis, as JSON
#[wasm_bindgen]
pub fn heuristic_diagnosis(image_len: usize) -> Result<String, JsValue> {
    serde_json::to_string(&shared::heuristic_diagnosis(image_len))
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_yield() {
        assert_eq!(estimate_yield("tomato", 10.0), "80.0 kg");
        assert_eq!(estimate_yield("dragonfruit", 4.0), "10.0 kg");
        assert_eq!(harvest_days("Basil"), 30);
    }

    #[test]
    fn test_sensor_status() {
        assert_eq!(sensor_status(22.0, 60.0, 50.0), "optimal");
        assert_eq!(sensor_status(22.0, 60.0, 20.0), "warning");
        assert_eq!(sensor_status(36.0, 60.0, 50.0), "critical");
    }

    #[test]
    fn test_weather_conditions() {
        assert_eq!(weather_conditions(20.0, 1.0).unwrap(), "partly_cloudy");
        assert_eq!(weather_conditions(30.0, 12.0).unwrap(), "rainy");
    }

    #[test]
    fn test_crop_plan_json() {
        let json = design_crop_plan("Lisbon", 12.0, 3.0).unwrap();
        let plan: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(plan["suggestions"][1]["crop_name"], "Arugula");
    }

    #[test]
    fn test_uploadable_image() {
        assert!(is_uploadable_image("image/png"));
        assert!(!is_uploadable_image("application/pdf"));
    }

    #[test]
    fn test_heuristic_json() {
        let json = heuristic_diagnosis(10).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_offline_answer_in_browser() {
        assert!(offline_chat_answer("how do I water basil").contains("water"));
    }

    #[wasm_bindgen_test]
    fn test_invalid_area_is_js_error() {
        assert!(design_crop_plan("Lisbon", -1.0, 5.0).is_err());
    }
}
