//! Crop knowledge base and rooftop crop recommendations

use serde::{Deserialize, Serialize};

/// Growth parameters of a crop species
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProfile {
    pub name: &'static str,
    /// Days from planting to first harvest
    pub harvest_days: u32,
    /// Expected yield per square meter (kg)
    pub yield_per_sqm: f64,
    pub stages: &'static [&'static str],
}

/// Crop used whenever a name is not in the knowledge base
pub const DEFAULT_CROP: &str = "lettuce";

pub static CROP_DATABASE: &[CropProfile] = &[
    CropProfile {
        name: "lettuce",
        harvest_days: 45,
        yield_per_sqm: 2.5,
        stages: &[
            "Germination (7 days)",
            "Seedling (14 days)",
            "Growth (21 days)",
            "Harvest (45 days)",
        ],
    },
    CropProfile {
        name: "tomato",
        harvest_days: 75,
        yield_per_sqm: 8.0,
        stages: &[
            "Germination (10 days)",
            "Seedling (20 days)",
            "Flowering (40 days)",
            "Fruiting (60 days)",
            "Harvest (75 days)",
        ],
    },
    CropProfile {
        name: "basil",
        harvest_days: 30,
        yield_per_sqm: 1.2,
        stages: &[
            "Germination (7 days)",
            "Seedling (14 days)",
            "Harvest (30 days)",
        ],
    },
    CropProfile {
        name: "mint",
        harvest_days: 60,
        yield_per_sqm: 1.5,
        stages: &[
            "Germination (10 days)",
            "Establishment (30 days)",
            "Harvest (60 days)",
        ],
    },
    CropProfile {
        name: "spinach",
        harvest_days: 40,
        yield_per_sqm: 2.0,
        stages: &[
            "Germination (7 days)",
            "Seedling (14 days)",
            "Harvest (40 days)",
        ],
    },
];

/// Case-insensitive lookup; unknown crops resolve to lettuce
pub fn lookup_crop(name: &str) -> &'static CropProfile {
    let key = name.trim().to_lowercase();
    CROP_DATABASE
        .iter()
        .find(|profile| profile.name == key)
        .or_else(|| CROP_DATABASE.iter().find(|profile| profile.name == DEFAULT_CROP))
        .unwrap_or(&CROP_DATABASE[0])
}

/// Format a yield in kilograms with one decimal
pub fn format_yield_kg(kg: f64) -> String {
    format!("{:.1} kg", kg)
}

// ============================================================================
// Crop Designer
// ============================================================================

/// Crop designer request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropDesignRequest {
    pub city: String,
    /// Rooftop area in square meters
    pub rooftop_area: f64,
    /// Direct sunlight per day
    pub sunlight_hours: f64,
}

/// A single suggested crop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropSuggestion {
    pub crop_name: String,
    pub suitability_score: f64,
    pub planting_season: String,
    pub estimated_yield: String,
    pub care_tips: String,
}

/// Crop designer response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropDesignResponse {
    pub suggestions: Vec<CropSuggestion>,
    pub planting_plan: String,
    pub location_analysis: String,
}

/// Most suggestions returned per request
pub const MAX_SUGGESTIONS: usize = 3;

/// Sunlight exposure class of a rooftop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SunlightBucket {
    /// 6 or more hours of direct sun
    High,
    /// 4 to 6 hours
    Medium,
    /// Less than 4 hours
    Low,
}

impl SunlightBucket {
    pub fn from_hours(hours: f64) -> Self {
        if hours >= 6.0 {
            SunlightBucket::High
        } else if hours >= 4.0 {
            SunlightBucket::Medium
        } else {
            SunlightBucket::Low
        }
    }
}

/// Row of the recommendation table
struct CropTemplate {
    crop_name: &'static str,
    suitability_score: f64,
    planting_season: &'static str,
    /// kg per square meter per yield period
    yield_coefficient: f64,
    yield_period: &'static str,
    care_tips: &'static str,
}

impl CropTemplate {
    fn suggest(&self, area: f64) -> CropSuggestion {
        CropSuggestion {
            crop_name: self.crop_name.to_string(),
            suitability_score: self.suitability_score,
            planting_season: self.planting_season.to_string(),
            estimated_yield: format!("{:.1} kg {}", area * self.yield_coefficient, self.yield_period),
            care_tips: self.care_tips.to_string(),
        }
    }
}

const HIGH_SUN_CROPS: [CropTemplate; 2] = [
    CropTemplate {
        crop_name: "Tomatoes",
        suitability_score: 0.92,
        planting_season: "Spring-Summer (or year-round in warm climates)",
        yield_coefficient: 1.5,
        yield_period: "per season",
        care_tips: "Full sun required. Stake or cage for support. Water consistently, avoid wetting leaves. Harvest when fully colored.",
    },
    CropTemplate {
        crop_name: "Peppers (Bell/Chili)",
        suitability_score: 0.88,
        planting_season: "Spring-Summer",
        yield_coefficient: 1.0,
        yield_period: "per season",
        care_tips: "Loves heat and sun. Well-drained soil. Water at base. Harvest when firm and colored.",
    },
];

const MEDIUM_SUN_CROPS: [CropTemplate; 2] = [
    CropTemplate {
        crop_name: "Lettuce (Various types)",
        suitability_score: 0.95,
        planting_season: "Year-round (avoid extreme heat)",
        yield_coefficient: 0.9,
        yield_period: "per cycle (45-60 days)",
        care_tips: "Partial shade OK. Keep soil moist. Harvest outer leaves for continuous growth. Plant in spring/fall for best results.",
    },
    CropTemplate {
        crop_name: "Spinach",
        suitability_score: 0.90,
        planting_season: "Spring and Fall",
        yield_coefficient: 0.7,
        yield_period: "per cycle",
        care_tips: "Cool weather crop. Rich soil. Water regularly. Harvest leaves when 6-8 inches tall.",
    },
];

const LOW_SUN_CROPS: [CropTemplate; 2] = [
    CropTemplate {
        crop_name: "Lettuce (Shade-tolerant varieties)",
        suitability_score: 0.85,
        planting_season: "Year-round",
        yield_coefficient: 0.6,
        yield_period: "per cycle",
        care_tips: "Tolerates partial shade. Keep consistently moist. Consider adding grow lights for better results.",
    },
    CropTemplate {
        crop_name: "Arugula",
        suitability_score: 0.80,
        planting_season: "Spring and Fall",
        yield_coefficient: 0.5,
        yield_period: "per cycle",
        care_tips: "Partial shade tolerant. Fast growing. Harvest young leaves for best flavor.",
    },
];

/// Herbs suit every bucket
const HERB_CROP: CropTemplate = CropTemplate {
    crop_name: "Herbs (Basil, Mint, Cilantro, Parsley)",
    suitability_score: 0.93,
    planting_season: "Year-round (indoors in winter)",
    yield_coefficient: 0.6,
    yield_period: "per month",
    care_tips: "Well-drained soil. Pinch flowers to encourage leaf growth. Most herbs prefer 4-6 hours sun. Great for containers!",
};

/// Build a rooftop crop plan.
///
/// The two bucket crops come first, then the herb suggestion, and the list
/// is capped at [`MAX_SUGGESTIONS`]. With two crops per bucket the herb is
/// always kept.
pub fn recommend_crops(city: &str, area: f64, sunlight_hours: f64) -> CropDesignResponse {
    let bucket = SunlightBucket::from_hours(sunlight_hours);
    let bucket_crops: &[CropTemplate] = match bucket {
        SunlightBucket::High => &HIGH_SUN_CROPS,
        SunlightBucket::Medium => &MEDIUM_SUN_CROPS,
        SunlightBucket::Low => &LOW_SUN_CROPS,
    };

    let suggestions: Vec<CropSuggestion> = bucket_crops
        .iter()
        .chain(std::iter::once(&HERB_CROP))
        .take(MAX_SUGGESTIONS)
        .map(|template| template.suggest(area))
        .collect();

    let planting_plan = match bucket {
        SunlightBucket::High => format!(
            "Your {area} sqm rooftop in {city} with {sunlight_hours} hours of daily sunlight is excellent for growing! \
             Start with tomatoes and peppers in spring for high yields. Add herbs year-round for continuous harvest. \
             Consider vertical growing to maximize space."
        ),
        SunlightBucket::Medium => format!(
            "Your {area} sqm rooftop in {city} with {sunlight_hours} hours of sunlight is perfect for leafy greens! \
             Start with lettuce and spinach - they grow quickly and can be harvested multiple times. Add herbs for variety. \
             Consider succession planting for continuous harvest."
        ),
        SunlightBucket::Low => format!(
            "Your {area} sqm rooftop in {city} with {sunlight_hours} hours of sunlight works well for shade-tolerant crops. \
             Focus on leafy greens and herbs. Consider adding reflective surfaces or grow lights to increase light \
             availability for better yields."
        ),
    };

    let location_analysis = format!(
        "{city} is suitable for urban rooftop farming. With {sunlight_hours} hours of daily sunlight, you can grow a variety of crops. \
         Rooftop gardens benefit from good air circulation and can be protected from ground pests. \
         Use containers with proper drainage and consider wind protection for taller plants."
    );

    CropDesignResponse {
        suggestions,
        planting_plan,
        location_analysis,
    }
}
