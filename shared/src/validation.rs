//! Validation utilities for FarmMind request inputs

// ============================================================================
// Rooftop Validations
// ============================================================================

/// Largest rooftop area accepted, in square meters
pub const MAX_ROOFTOP_AREA_SQM: f64 = 100_000.0;

/// Validate rooftop area is a positive, finite number of square meters
pub fn validate_rooftop_area(area: f64) -> Result<(), &'static str> {
    if !area.is_finite() {
        return Err("Rooftop area must be a finite number");
    }
    if area <= 0.0 {
        return Err("Rooftop area must be greater than zero");
    }
    if area > MAX_ROOFTOP_AREA_SQM {
        return Err("Rooftop area must be at most 100000 square meters");
    }
    Ok(())
}

/// Validate daily sunlight hours (0-24)
pub fn validate_sunlight_hours(hours: f64) -> Result<(), &'static str> {
    if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
        return Err("Sunlight hours must be between 0 and 24");
    }
    Ok(())
}

// ============================================================================
// Upload Validations
// ============================================================================

/// Validate that an upload declares an image content type
pub fn validate_image_content_type(content_type: Option<&str>) -> Result<(), &'static str> {
    match content_type {
        Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
        _ => Err("File must be an image"),
    }
}

// ============================================================================
// Chat & Forecast Validations
// ============================================================================

/// Longest chat message accepted, in characters
pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;

/// Validate a chat message is non-empty and bounded
pub fn validate_chat_message(message: &str) -> Result<(), &'static str> {
    if message.trim().is_empty() {
        return Err("Message must not be empty");
    }
    if message.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err("Message must be at most 4000 characters");
    }
    Ok(())
}

/// Validate a forecast horizon in days (1-365)
pub fn validate_forecast_days(days: u32) -> Result<(), &'static str> {
    if !(1..=365).contains(&days) {
        return Err("Forecast days must be between 1 and 365");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooftop_area() {
        assert!(validate_rooftop_area(10.0).is_ok());
        assert!(validate_rooftop_area(0.5).is_ok());
        assert!(validate_rooftop_area(0.0).is_err());
        assert!(validate_rooftop_area(-3.0).is_err());
        assert!(validate_rooftop_area(f64::NAN).is_err());
        assert!(validate_rooftop_area(f64::INFINITY).is_err());
        assert!(validate_rooftop_area(200_000.0).is_err());
    }

    #[test]
    fn test_sunlight_hours() {
        assert!(validate_sunlight_hours(0.0).is_ok());
        assert!(validate_sunlight_hours(7.5).is_ok());
        assert!(validate_sunlight_hours(24.0).is_ok());
        assert!(validate_sunlight_hours(-1.0).is_err());
        assert!(validate_sunlight_hours(25.0).is_err());
    }

    #[test]
    fn test_image_content_type() {
        assert!(validate_image_content_type(Some("image/jpeg")).is_ok());
        assert!(validate_image_content_type(Some("image/png")).is_ok());
        assert!(validate_image_content_type(Some("IMAGE/WEBP")).is_ok());
        assert!(validate_image_content_type(Some("text/plain")).is_err());
        assert!(validate_image_content_type(Some("application/octet-stream")).is_err());
        assert!(validate_image_content_type(None).is_err());
    }

    #[test]
    fn test_chat_message() {
        assert!(validate_chat_message("How often should I water?").is_ok());
        assert!(validate_chat_message("   ").is_err());
        assert!(validate_chat_message(&"a".repeat(4001)).is_err());
    }

    #[test]
    fn test_forecast_days() {
        assert!(validate_forecast_days(1).is_ok());
        assert!(validate_forecast_days(365).is_ok());
        assert!(validate_forecast_days(0).is_err());
        assert!(validate_forecast_days(366).is_err());
    }
}
