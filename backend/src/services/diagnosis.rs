//! Parsing of free-form model replies into a plant health result
//!
//! Models are asked for a JSON object but often wrap it in prose or skip it
//! entirely. The first flat object mentioning `"status"` is preferred;
//! otherwise the text itself is scanned for disease vocabulary.

use serde_json::{Map, Value};

use crate::error::{UpstreamError, UpstreamResult};
use shared::{
    title_case, HealthStatus, PlantHealthResult, Severity, DEFAULT_CONFIDENCE,
    DEFAULT_SUGGESTED_FIX,
};

/// Longest treatment line taken from prose, in characters
pub const MAX_FIX_CHARS: usize = 500;

const DISEASE_WORDS: [&str; 8] = [
    "disease", "infected", "sick", "decay", "rot", "mildew", "spot", "rust",
];

const KNOWN_DISEASES: [&str; 7] = [
    "leaf spot",
    "powdery mildew",
    "rust",
    "blight",
    "aphid",
    "root rot",
    "nutrient deficiency",
];

const FIX_MARKERS: [&str; 5] = ["fix", "treatment", "solution", "recommend", "suggest"];

/// Turn a model reply into a diagnosis
pub fn parse_diagnosis(reply: &str) -> UpstreamResult<PlantHealthResult> {
    if reply.trim().is_empty() {
        return Err(UpstreamError::MalformedResponse("empty reply".to_string()));
    }

    if let Some(result) = extract_json_object(reply).and_then(parse_structured) {
        return Ok(result);
    }

    tracing::debug!("No structured diagnosis in reply, scanning text");
    Ok(parse_free_text(reply))
}

/// First `{...}` without nested braces that mentions `"status"`
pub fn extract_json_object(text: &str) -> Option<&str> {
    text.match_indices('{').find_map(|(start, _)| {
        let body = &text[start + 1..];
        let end = body.find(['{', '}'])?;
        if body.as_bytes()[end] != b'}' {
            return None;
        }
        let candidate = &text[start..start + end + 2];
        candidate.contains("\"status\"").then_some(candidate)
    })
}

fn parse_structured(json: &str) -> Option<PlantHealthResult> {
    let value: Value = serde_json::from_str(json).ok()?;
    let fields = value.as_object()?;

    Some(PlantHealthResult {
        status: string_field(fields, "status")
            .and_then(HealthStatus::parse)
            .unwrap_or(HealthStatus::Unknown),
        disease_name: string_field(fields, "disease_name")
            .filter(|name| !name.eq_ignore_ascii_case("null") && !name.eq_ignore_ascii_case("none"))
            .map(str::to_string),
        confidence: fields
            .get("confidence")
            .and_then(confidence_value)
            .unwrap_or(DEFAULT_CONFIDENCE),
        suggested_fix: string_field(fields, "suggested_fix")
            .unwrap_or(DEFAULT_SUGGESTED_FIX)
            .to_string(),
        severity: string_field(fields, "severity")
            .and_then(Severity::parse)
            .unwrap_or(Severity::Medium),
    })
}

/// Trimmed, non-empty string value
fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn confidence_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (0.0..=1.0).contains(&number).then_some(number)
}

/// Keyword reading of a reply that carries no usable JSON
pub fn parse_free_text(reply: &str) -> PlantHealthResult {
    // ASCII lowering keeps byte offsets aligned with `reply`
    let lower = reply.to_ascii_lowercase();

    let diseased = DISEASE_WORDS.iter().any(|word| lower.contains(word));
    let disease_name = if diseased {
        KNOWN_DISEASES
            .iter()
            .find(|name| lower.contains(*name))
            .map(|name| title_case(name))
    } else {
        None
    };

    PlantHealthResult {
        status: if diseased {
            HealthStatus::Diseased
        } else {
            HealthStatus::Healthy
        },
        disease_name,
        confidence: extract_confidence(&lower).unwrap_or(DEFAULT_CONFIDENCE),
        suggested_fix: extract_fix(reply, &lower),
        severity: severity_from_words(&lower),
    }
}

/// Number after "confidence" plus `:` or whitespace; percentages are scaled
fn extract_confidence(lower: &str) -> Option<f64> {
    lower.match_indices("confidence").find_map(|(idx, word)| {
        let rest = &lower[idx + word.len()..];
        let value = rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
        if value.len() == rest.len() {
            return None;
        }
        let digits: String = value
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let mut confidence: f64 = digits.parse().ok()?;
        if confidence > 1.0 {
            confidence /= 100.0;
        }
        (0.0..=1.0).contains(&confidence).then_some(confidence)
    })
}

fn severity_from_words(lower: &str) -> Severity {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let mentions = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));

    if mentions(&["low", "mild"]) {
        Severity::Low
    } else if mentions(&["high", "severe"]) {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Rest of the first line starting at a treatment marker
fn extract_fix(reply: &str, lower: &str) -> String {
    let start = FIX_MARKERS
        .iter()
        .filter_map(|marker| lower.find(marker))
        .min();

    let Some(start) = start else {
        return DEFAULT_SUGGESTED_FIX.to_string();
    };

    let line = reply[start..].lines().next().unwrap_or_default().trim();
    if line.is_empty() {
        return DEFAULT_SUGGESTED_FIX.to_string();
    }
    if line.chars().count() > MAX_FIX_CHARS {
        let truncated: String = line.chars().take(MAX_FIX_CHARS).collect();
        format!("{}...", truncated)
    } else {
        line.to_string()
    }
}
