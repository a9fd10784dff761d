//! Ollama API client
//!
//! Client for the optional local LLM service used by the chat assistant and
//! the plant health classifier.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::OllamaConfig;
use crate::error::{UpstreamError, UpstreamResult};

/// Client for the Ollama HTTP API
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    text_model: String,
    vision_model: String,
    probe_timeout: Duration,
}

/// Message in a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    pub role: String,
    pub content: String,
    /// Base64-encoded images for vision models
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl OllamaMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image_base64: String) -> Self {
        self.images.push(image_base64);
        self
    }
}

/// Sampling options
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Token budget for the reply
    pub num_predict: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [OllamaMessage],
    stream: bool,
    options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    message: Option<OllamaMessage>,
    response: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerationOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponseBody {
    #[serde(default)]
    response: String,
}

/// Response of the model-listing endpoint
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &OllamaConfig) -> Self {
        Self {
            http_client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            vision_model: config.vision_model.clone(),
            probe_timeout: config.probe_timeout(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Liveness probe: any 200 from the model listing counts, whatever the body
    pub async fn is_available(&self) -> bool {
        let result = self
            .http_client
            .get(self.url("/api/tags"))
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::debug!("Ollama liveness probe returned {}", response.status());
                false
            }
            Err(e) => {
                tracing::debug!("Ollama liveness probe failed: {}", e);
                false
            }
        }
    }

    /// Names of the locally installed models
    pub async fn list_models(&self) -> UpstreamResult<Vec<String>> {
        let response = self
            .http_client
            .get(self.url("/api/tags"))
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Self::status_error(response).await);
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Chat completion; returns the assistant message text
    pub async fn chat(
        &self,
        model: &str,
        messages: &[OllamaMessage],
        options: GenerationOptions,
        timeout: Duration,
    ) -> UpstreamResult<String> {
        let request = ChatRequest {
            model,
            messages,
            stream: false,
            options,
        };

        tracing::info!("Calling Ollama at {} with model {}", self.url("/api/chat"), model);

        let response = self
            .send_checked(
                self.http_client
                    .post(self.url("/api/chat"))
                    .timeout(timeout)
                    .json(&request),
                model,
            )
            .await?;

        let body: ChatResponseBody = response.json().await?;
        match (body.message, body.response) {
            (Some(message), _) => Ok(message.content),
            (None, Some(text)) => Ok(text),
            (None, None) => Err(UpstreamError::MalformedResponse(
                "chat response has no message content".to_string(),
            )),
        }
    }

    /// Plain prompt completion
    pub async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: GenerationOptions,
        timeout: Duration,
    ) -> UpstreamResult<String> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .send_checked(
                self.http_client
                    .post(self.url("/api/generate"))
                    .timeout(timeout)
                    .json(&request),
                model,
            )
            .await?;

        let body: GenerateResponseBody = response.json().await?;
        Ok(body.response)
    }

    async fn send_checked(&self, request: RequestBuilder, model: &str) -> UpstreamResult<Response> {
        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => {
                tracing::error!("Ollama model '{}' not found. Run: ollama pull {}", model, model);
                Err(UpstreamError::ModelNotFound(model.to_string()))
            }
            _ => Err(Self::status_error(response).await),
        }
    }

    async fn status_error(response: Response) -> UpstreamError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        UpstreamError::Status { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let config = OllamaConfig {
            base_url: "http://localhost:11434/".to_string(),
            ..OllamaConfig::default()
        };
        let client = OllamaClient::new(&config);
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }

    #[test]
    fn test_text_message_omits_images() {
        let json = serde_json::to_value(OllamaMessage::new("user", "hello")).unwrap();
        assert!(json.get("images").is_none());

        let json = serde_json::to_value(
            OllamaMessage::new("user", "look").with_image("aGVsbG8=".to_string()),
        )
        .unwrap();
        assert_eq!(json["images"][0], "aGVsbG8=");
    }

    #[test]
    fn test_unreachable_service_is_unavailable() {
        let config = OllamaConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            probe_timeout_secs: 1,
            ..OllamaConfig::default()
        };
        let client = OllamaClient::new(&config);
        assert!(!tokio_test::block_on(client.is_available()));
    }

    async fn serve_tags(status: axum::http::StatusCode, body: &'static str) -> OllamaClient {
        let app = axum::Router::new().route(
            "/api/tags",
            axum::routing::get(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        OllamaClient::new(&OllamaConfig {
            base_url: format!("http://{}", addr),
            probe_timeout_secs: 1,
            ..OllamaConfig::default()
        })
    }

    #[tokio::test]
    async fn test_liveness_only_needs_ok_status() {
        let client = serve_tags(axum::http::StatusCode::OK, "Ollama is running").await;
        assert!(client.is_available().await);
        assert!(client.list_models().await.is_err());

        let client = serve_tags(axum::http::StatusCode::SERVICE_UNAVAILABLE, "loading").await;
        assert!(!client.is_available().await);
    }

    #[test]
    fn test_chat_request_shape() {
        let messages = [OllamaMessage::new("system", "be brief")];
        let request = ChatRequest {
            model: "llama2:latest",
            messages: &messages,
            stream: false,
            options: GenerationOptions {
                temperature: 0.7,
                num_predict: 200,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 200);
        assert_eq!(json["messages"][0]["role"], "system");
    }
}
