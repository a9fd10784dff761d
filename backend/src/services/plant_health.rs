//! Plant health classification
//!
//! Leaf photos go through an ordered chain: a vision model, then a text model
//! fed with colour statistics, then a size heuristic that always answers.
//! The model tiers are skipped when the liveness probe fails.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::OllamaConfig;
use crate::error::{AppError, AppResult, UpstreamError};
use crate::external::ollama::{GenerationOptions, OllamaMessage};
use crate::external::OllamaClient;
use crate::services::diagnosis::parse_diagnosis;
use crate::services::image_analysis::color_profile;
use crate::AppState;
use shared::{heuristic_diagnosis, validate_image_content_type, PlantHealthResult};

const DIAGNOSIS_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.3,
    num_predict: 300,
};

const VISION_PROMPT: &str = r#"You are an expert plant pathologist. Analyze this plant leaf image and identify any diseases, pests, or health issues.

Provide your analysis in this exact JSON format:
{
    "status": "healthy" or "diseased",
    "disease_name": "name of disease if found, or null if healthy",
    "confidence": 0.0 to 1.0,
    "severity": "low", "medium", or "high",
    "suggested_fix": "detailed treatment recommendation"
}

Common plant diseases to look for:
- Leaf Spot (brown/black spots on leaves)
- Powdery Mildew (white powdery coating)
- Rust (orange/brown pustules)
- Blight (rapid wilting and browning)
- Aphids or other pests
- Nutrient deficiency (yellowing leaves)
- Root rot (wilting, yellowing, soft roots)

If the plant looks healthy, set status to "healthy" and disease_name to null.
Be specific about the disease name and provide actionable treatment advice."#;

const TEXT_PROMPT_GUIDE: &str = r#"Analyze this plant and identify any diseases or health issues. Common issues:
- Leaf Spot: brown/black spots
- Powdery Mildew: white powdery coating
- Rust: orange/brown pustules
- Nutrient deficiency: yellowing leaves
- Root rot: wilting, yellowing

Respond in JSON format:
{
    "status": "healthy" or "diseased",
    "disease_name": "specific disease name or null",
    "confidence": 0.0-1.0,
    "severity": "low/medium/high",
    "suggested_fix": "detailed treatment advice"
}"#;

/// Model-backed tiers, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisTier {
    Vision,
    TextDescription,
}

impl DiagnosisTier {
    pub const CHAIN: [DiagnosisTier; 2] = [DiagnosisTier::Vision, DiagnosisTier::TextDescription];
}

/// Why a tier gave up; the chain moves on in every case
#[derive(Error, Debug)]
enum TierFailure {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Image could not be decoded: {0}")]
    UndecodableImage(#[from] image::ImageError),

    #[error("Image analysis task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Plant health service
#[derive(Clone)]
pub struct PlantHealthService {
    ollama: OllamaClient,
    config: OllamaConfig,
    permits: Arc<Semaphore>,
}

impl PlantHealthService {
    /// Create a new PlantHealthService instance
    pub fn new(ollama: OllamaClient, config: OllamaConfig, permits: Arc<Semaphore>) -> Self {
        Self {
            ollama,
            config,
            permits,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.ollama.clone(),
            state.config.ollama.clone(),
            state.llm_permits.clone(),
        )
    }

    /// Validate an upload and diagnose it
    pub async fn classify(
        &self,
        image: &[u8],
        content_type: Option<&str>,
    ) -> AppResult<PlantHealthResult> {
        validate_image_content_type(content_type)
            .map_err(|e| AppError::InvalidUpload(e.to_string()))?;
        if image.is_empty() {
            return Err(AppError::InvalidUpload("Uploaded file is empty".to_string()));
        }

        tracing::info!(
            "Analyzing plant image: {} bytes, {}",
            image.len(),
            content_type.unwrap_or_default()
        );

        Ok(self.diagnose(image).await)
    }

    /// Run the fallback chain; never fails
    pub async fn diagnose(&self, image: &[u8]) -> PlantHealthResult {
        if self.ollama.is_available().await {
            for tier in DiagnosisTier::CHAIN {
                match self.attempt(tier, image).await {
                    Ok(result) => {
                        tracing::info!("{:?} diagnosis complete: {:?}", tier, result.status);
                        return result;
                    }
                    Err(e) => tracing::warn!("{:?} diagnosis failed: {}", tier, e),
                }
            }
        } else {
            tracing::info!("Ollama not available, skipping model diagnosis");
        }

        tracing::info!("Using heuristic plant health fallback");
        heuristic_diagnosis(image.len())
    }

    async fn attempt(
        &self,
        tier: DiagnosisTier,
        image: &[u8],
    ) -> Result<PlantHealthResult, TierFailure> {
        let reply = match tier {
            DiagnosisTier::Vision => self.vision_reply(image).await?,
            DiagnosisTier::TextDescription => self.text_reply(image).await?,
        };
        Ok(parse_diagnosis(&reply)?)
    }

    async fn vision_reply(&self, image: &[u8]) -> Result<String, TierFailure> {
        let messages = [OllamaMessage::new("user", VISION_PROMPT).with_image(BASE64.encode(image))];

        let _permit = self.acquire().await?;
        let reply = self
            .ollama
            .chat(
                self.ollama.vision_model(),
                &messages,
                DIAGNOSIS_OPTIONS,
                self.config.vision_timeout(),
            )
            .await?;
        Ok(reply)
    }

    async fn text_reply(&self, image: &[u8]) -> Result<String, TierFailure> {
        let bytes = image.to_vec();
        let profile = tokio::task::spawn_blocking(move || color_profile(&bytes)).await??;
        let prompt = format!(
            "You are an expert plant pathologist. {}\n\n{}",
            profile.describe(),
            TEXT_PROMPT_GUIDE
        );

        let _permit = self.acquire().await?;
        let reply = self
            .ollama
            .generate(
                self.ollama.text_model(),
                &prompt,
                DIAGNOSIS_OPTIONS,
                self.config.text_timeout(),
            )
            .await?;
        Ok(reply)
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, UpstreamError> {
        self.permits
            .acquire()
            .await
            .map_err(|_| UpstreamError::PoolClosed)
    }
}
