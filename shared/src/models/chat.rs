//! Farm chat models and the offline keyword answers

use serde::{Deserialize, Serialize};

/// Conversation id echoed when the caller sends none
pub const DEFAULT_CONVERSATION_ID: &str = "default";
/// Caller-supplied turns forwarded to the model
pub const HISTORY_WINDOW: usize = 5;

/// Appended to every answer produced without the model
pub const FALLBACK_NOTE: &str =
    "\n\n(Note: Running in fallback mode. To use AI, make sure Ollama is running locally.)";

pub const INTRO_MESSAGE: &str = "I'm FarmGPT, your rooftop farming assistant! I can help with watering, fertilizing, pests, sunlight, harvesting, soil, temperature, spacing, and disease prevention. What specific question do you have about your rooftop farm?";

/// Author of a chat turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// One prior turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Incoming chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    pub conversation_id: Option<String>,
    /// Earlier turns kept by the caller; only the last few are used
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

impl ChatMessage {
    pub fn conversation_id(&self) -> String {
        self.conversation_id
            .clone()
            .unwrap_or_else(|| DEFAULT_CONVERSATION_ID.to_string())
    }

    /// The most recent turns, oldest first
    pub fn recent_history(&self) -> &[ChatTurn] {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[start..]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
}

/// Chat backend availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStatus {
    pub ollama_available: bool,
    pub ollama_url: String,
    pub ollama_model: String,
    pub ollama_vision_model: String,
    pub status: String,
    pub message: String,
}

impl ChatStatus {
    pub fn new(available: bool, url: &str, model: &str, vision_model: &str) -> Self {
        let (status, message) = if available {
            ("ready", "Ollama is running")
        } else {
            ("fallback_mode", "Ollama is not running - using fallback responses")
        };
        Self {
            ollama_available: available,
            ollama_url: url.to_string(),
            ollama_model: model.to_string(),
            ollama_vision_model: vision_model.to_string(),
            status: status.to_string(),
            message: message.to_string(),
        }
    }
}

// ============================================================================
// Keyword Answers
// ============================================================================

/// Farming topics with canned answers, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmTopic {
    Water,
    Fertilizer,
    Pest,
    Sun,
    Harvest,
    Soil,
    Temperature,
    Spacing,
    Disease,
}

impl FarmTopic {
    pub const ALL: [FarmTopic; 9] = [
        FarmTopic::Water,
        FarmTopic::Fertilizer,
        FarmTopic::Pest,
        FarmTopic::Sun,
        FarmTopic::Harvest,
        FarmTopic::Soil,
        FarmTopic::Temperature,
        FarmTopic::Spacing,
        FarmTopic::Disease,
    ];

    /// Word stem searched for in the lowercased message
    pub fn keyword(&self) -> &'static str {
        match self {
            FarmTopic::Water => "water",
            FarmTopic::Fertilizer => "fertiliz",
            FarmTopic::Pest => "pest",
            FarmTopic::Sun => "sun",
            FarmTopic::Harvest => "harvest",
            FarmTopic::Soil => "soil",
            FarmTopic::Temperature => "temperatur",
            FarmTopic::Spacing => "spac",
            FarmTopic::Disease => "disease",
        }
    }

    pub fn answer(&self) -> &'static str {
        match self {
            FarmTopic::Water => "Water your plants early morning or late evening when evaporation is low. Check soil moisture 2 inches deep - if dry, water thoroughly. Most vegetables need 1-2 inches of water per week. For rooftop gardens, use drip irrigation to save water. Water at the base of plants, not on leaves, to prevent disease.",
            FarmTopic::Fertilizer => "Use organic compost or balanced NPK fertilizer (10-10-10). Apply every 2-4 weeks during growing season. Avoid over-fertilizing as it can burn roots. For rooftop farms, liquid fertilizers work well in containers. Mix fertilizer into soil before planting, then side-dress during growth.",
            FarmTopic::Pest => "Inspect plants regularly for signs of pests. Use neem oil or insecticidal soap for organic pest control. Remove affected leaves promptly. Encourage beneficial insects like ladybugs. Keep your rooftop garden clean to prevent pest buildup. Check under leaves where pests hide.",
            FarmTopic::Sun => "Most vegetables need 6-8 hours of direct sunlight daily. Leafy greens like lettuce can tolerate partial shade (4-6 hours). Monitor plant growth - if leaves are pale, they need more sun. Use reflective surfaces to maximize light on rooftops. Rotate containers if needed.",
            FarmTopic::Harvest => "Harvest in the morning when plants are most hydrated. Use clean, sharp tools to avoid damage. Pick regularly to encourage continuous growth. For leafy greens, harvest outer leaves first. Tomatoes should be picked when fully colored but still firm. Harvest frequently for best flavor.",
            FarmTopic::Soil => "Use well-draining potting mix for rooftop containers. Mix compost with perlite for better drainage. Test pH - most vegetables prefer 6.0-7.0. Replace soil annually or rotate crops to prevent disease buildup. Add organic matter regularly to maintain fertility.",
            FarmTopic::Temperature => "Most vegetables grow best between 18-25°C. Protect from extreme heat with shade cloth. In cold weather, use row covers or move containers indoors. Monitor temperature with a thermometer. Rooftops can get very hot - provide afternoon shade in summer.",
            FarmTopic::Spacing => "Give plants enough space for air circulation. Follow seed packet spacing guidelines. Overcrowding leads to disease. In containers, use one plant per pot or space according to mature size. Proper spacing prevents fungal diseases and improves yields.",
            FarmTopic::Disease => "Prevent diseases by watering at the base, not on leaves. Ensure good air circulation. Remove diseased plants immediately. Use organic fungicides like copper-based sprays. Rotate crops to prevent soil-borne diseases. Keep tools clean and sanitized.",
        }
    }
}

/// First topic whose keyword appears in the message
pub fn match_topic(message: &str) -> Option<FarmTopic> {
    let lower = message.to_lowercase();
    FarmTopic::ALL
        .into_iter()
        .find(|topic| lower.contains(topic.keyword()))
        .or_else(|| match_intent(&lower))
}

/// Question-shaped messages that name a topic indirectly.
///
/// Only reached when no keyword matched, so of the stems checked here only
/// "nutrient" can still fire; the water and fertiliz arms never do.
fn match_intent(lower: &str) -> Option<FarmTopic> {
    let asks_frequency = ["how often", "when", "frequency"]
        .iter()
        .any(|cue| lower.contains(cue));
    if asks_frequency {
        if lower.contains("water") {
            return Some(FarmTopic::Water);
        }
        if lower.contains("fertiliz") {
            return Some(FarmTopic::Fertilizer);
        }
    }

    let asks_choice = ["what", "which", "recommend"]
        .iter()
        .any(|cue| lower.contains(cue));
    if asks_choice {
        if lower.contains("fertiliz") || lower.contains("nutrient") {
            return Some(FarmTopic::Fertilizer);
        }
        if lower.contains("soil") {
            return Some(FarmTopic::Soil);
        }
    }

    None
}

/// Offline answer: matched topic, else the introduction
pub fn smart_response(message: &str) -> &'static str {
    match_topic(message)
        .map(|topic| topic.answer())
        .unwrap_or(INTRO_MESSAGE)
}

/// Offline answer with the fallback note appended
pub fn fallback_response(message: &str) -> String {
    format!("{}{}", smart_response(message), FALLBACK_NOTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_priority() {
        // water is checked before soil
        assert_eq!(match_topic("Is my soil holding water?"), Some(FarmTopic::Water));
        assert_eq!(match_topic("PESTS on my kale"), Some(FarmTopic::Pest));
        assert_eq!(match_topic("How should I space seedlings?"), Some(FarmTopic::Spacing));
        assert_eq!(match_topic("correct spacing for peppers"), Some(FarmTopic::Spacing));
        assert_eq!(match_topic("Fertilizer schedule"), Some(FarmTopic::Fertilizer));
    }

    #[test]
    fn test_intent_nutrients() {
        assert_eq!(
            match_topic("Which nutrients do tomatoes need?"),
            Some(FarmTopic::Fertilizer)
        );
        assert_eq!(match_topic("Which nutrients?"), Some(FarmTopic::Fertilizer));
        assert_eq!(match_topic("nutrients"), None);
    }

    #[test]
    fn test_keywords_win_over_intent() {
        assert_eq!(match_intent("how often should i water"), Some(FarmTopic::Water));
        // the keyword pass already answers it
        assert_eq!(match_topic("How often should I water?"), Some(FarmTopic::Water));
        assert_eq!(match_topic("When to fertilize?"), Some(FarmTopic::Fertilizer));
        assert_eq!(match_topic("When do nutrients matter?"), None);
    }

    #[test]
    fn test_intro_for_unmatched() {
        assert_eq!(smart_response("hello there"), INTRO_MESSAGE);
    }

    #[test]
    fn test_fallback_note() {
        let text = fallback_response("watering tips");
        assert!(text.starts_with(FarmTopic::Water.answer()));
        assert!(text.ends_with(FALLBACK_NOTE));
    }

    #[test]
    fn test_history_window() {
        let turn = |n: usize| ChatTurn {
            role: ChatRole::User,
            content: format!("turn {n}"),
        };
        let message = ChatMessage {
            message: "hi".into(),
            conversation_id: None,
            history: (0..8).map(turn).collect(),
        };
        let recent = message.recent_history();
        assert_eq!(recent.len(), HISTORY_WINDOW);
        assert_eq!(recent[0].content, "turn 3");
        assert_eq!(message.conversation_id(), "default");
    }
}
