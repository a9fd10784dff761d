//! Plant health diagnosis models

use serde::{Deserialize, Serialize};

/// Used whenever a diagnosis carries no usable treatment advice
pub const DEFAULT_SUGGESTED_FIX: &str = "Please consult with a plant expert for proper treatment.";
/// Confidence assumed when a diagnosis omits or garbles it
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Images below this size are treated as healthy by the heuristic
pub const SMALL_IMAGE_BYTES: usize = 50_000;
/// Images at or above this size are treated as heavily affected
pub const LARGE_IMAGE_BYTES: usize = 200_000;

/// Result of a leaf analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantHealthResult {
    pub status: HealthStatus,
    pub disease_name: Option<String>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    pub suggested_fix: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Diseased,
    Unknown,
}

impl HealthStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "healthy" => Some(HealthStatus::Healthy),
            "diseased" => Some(HealthStatus::Diseased),
            "unknown" => Some(HealthStatus::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}

/// Placeholder diagnosis when no inference backend answered.
///
/// Uses the upload size as a stand-in for leaf complexity. It is not a real
/// classifier and its disease names say so.
pub fn heuristic_diagnosis(image_len: usize) -> PlantHealthResult {
    if image_len < SMALL_IMAGE_BYTES {
        PlantHealthResult {
            status: HealthStatus::Healthy,
            disease_name: None,
            confidence: 0.85,
            suggested_fix: "Your plant looks healthy! Continue regular watering and monitoring."
                .to_string(),
            severity: Severity::Low,
        }
    } else if image_len < LARGE_IMAGE_BYTES {
        PlantHealthResult {
            status: HealthStatus::Diseased,
            disease_name: Some("Leaf Spot (simulated)".to_string()),
            confidence: 0.72,
            suggested_fix: "Remove affected leaves, improve air circulation, and apply organic fungicide. Water at the base, not on leaves.".to_string(),
            severity: Severity::Medium,
        }
    } else {
        PlantHealthResult {
            status: HealthStatus::Diseased,
            disease_name: Some("Powdery Mildew (simulated)".to_string()),
            confidence: 0.68,
            suggested_fix: "Apply neem oil solution, increase spacing between plants, and ensure proper ventilation. Remove severely affected leaves.".to_string(),
            severity: Severity::High,
        }
    }
}

/// Coarse colour statistics of a leaf photo
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorProfile {
    pub width: u32,
    pub height: u32,
    /// Number of pixels inspected
    pub sampled: usize,
    pub green: usize,
    pub yellow: usize,
    pub brown: usize,
    pub white: usize,
}

impl ColorProfile {
    /// Tally one RGB pixel
    pub fn record(&mut self, [r, g, b]: [u8; 3]) {
        let (r16, g16, b16) = (u16::from(r), u16::from(g), u16::from(b));
        self.sampled += 1;
        if r > 200 && g > 180 && b < 100 {
            self.yellow += 1;
        }
        if r > 80 && r < 150 && g > 50 && g < 120 && b < 80 {
            self.brown += 1;
        }
        if r16 + g16 + b16 > 700 {
            self.white += 1;
        }
        if g > r && g > b && g > 100 {
            self.green += 1;
        }
    }

    /// Natural-language summary handed to a text-only model
    pub fn describe(&self) -> String {
        let n = self.sampled;
        format!(
            "Plant leaf image analysis:\n\
             - Image size: {}x{} pixels\n\
             - Color analysis:\n  \
             * Green areas (healthy): {}/{n}\n  \
             * Yellow areas (possible deficiency): {}/{n}\n  \
             * Brown areas (possible disease/decay): {}/{n}\n  \
             * White areas (possible mildew): {}/{n}\n\n\
             Based on this analysis, identify if there are any plant diseases, pests, or health issues.",
            self.width, self.height, self.green, self.yellow, self.brown, self.white
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_thresholds() {
        let small = heuristic_diagnosis(40_000);
        assert_eq!(small.status, HealthStatus::Healthy);
        assert_eq!(small.confidence, 0.85);
        assert_eq!(small.disease_name, None);

        let medium = heuristic_diagnosis(100_000);
        assert_eq!(medium.disease_name.as_deref(), Some("Leaf Spot (simulated)"));
        assert_eq!(medium.confidence, 0.72);
        assert_eq!(medium.severity, Severity::Medium);

        let large = heuristic_diagnosis(300_000);
        assert_eq!(large.disease_name.as_deref(), Some("Powdery Mildew (simulated)"));
        assert_eq!(large.confidence, 0.68);
        assert_eq!(large.severity, Severity::High);
    }

    #[test]
    fn test_heuristic_boundaries() {
        assert_eq!(heuristic_diagnosis(49_999).status, HealthStatus::Healthy);
        assert_eq!(heuristic_diagnosis(50_000).severity, Severity::Medium);
        assert_eq!(heuristic_diagnosis(199_999).severity, Severity::Medium);
        assert_eq!(heuristic_diagnosis(200_000).severity, Severity::High);
    }

    #[test]
    fn test_color_profile_tally() {
        let mut profile = ColorProfile::default();
        profile.record([30, 160, 40]); // green
        profile.record([230, 200, 50]); // yellow
        profile.record([120, 80, 40]); // brown
        profile.record([250, 250, 250]); // white
        assert_eq!(profile.sampled, 4);
        assert_eq!(profile.green, 1);
        assert_eq!(profile.yellow, 1);
        assert_eq!(profile.brown, 1);
        assert_eq!(profile.white, 1);
        assert!(profile.describe().contains("Green areas (healthy): 1/4"));
    }

    #[test]
    fn test_status_and_severity_parsing() {
        assert_eq!(HealthStatus::parse(" Diseased "), Some(HealthStatus::Diseased));
        assert_eq!(HealthStatus::parse("sick"), None);
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse("extreme"), None);
    }
}
