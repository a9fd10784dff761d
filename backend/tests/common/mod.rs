//! Helpers shared by the integration tests

#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::time::Duration;

use farmmind_backend::config::OllamaConfig;
use farmmind_backend::Config;

/// Nothing listens on the discard port, so every probe fails fast
pub const UNREACHABLE_OLLAMA: &str = "http://127.0.0.1:9";

/// Configuration with the LLM service pointed at `base_url`
pub fn config_with_ollama(base_url: &str) -> Config {
    Config {
        ollama: OllamaConfig {
            base_url: base_url.to_string(),
            probe_timeout_secs: 1,
            chat_deadline_secs: 1,
            chat_timeout_secs: 5,
            vision_timeout_secs: 5,
            text_timeout_secs: 5,
            ..OllamaConfig::default()
        },
        ..Config::default()
    }
}

pub fn offline_config() -> Config {
    config_with_ollama(UNREACHABLE_OLLAMA)
}

/// Canned behaviour of the fake LLM service
#[derive(Clone, Default)]
pub struct MockOllama {
    /// `None` answers chat calls with 404, as for a missing model
    pub chat_reply: Option<String>,
    pub generate_reply: String,
    pub chat_delay: Duration,
}

impl MockOllama {
    pub fn chat(reply: &str) -> Self {
        Self {
            chat_reply: Some(reply.to_string()),
            ..Self::default()
        }
    }
}

/// Serve `mock` on an ephemeral port and return its base URL
pub async fn spawn_mock_ollama(mock: MockOllama) -> String {
    let app = Router::new()
        .route("/api/tags", get(tags))
        .route("/api/chat", post(chat))
        .route("/api/generate", post(generate))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn tags() -> Json<serde_json::Value> {
    Json(json!({ "models": [{ "name": "llama2:latest" }, { "name": "llava" }] }))
}

async fn chat(State(mock): State<MockOllama>) -> Response {
    tokio::time::sleep(mock.chat_delay).await;
    match mock.chat_reply {
        Some(reply) => Json(json!({
            "message": { "role": "assistant", "content": reply },
            "done": true
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, "model not found").into_response(),
    }
}

async fn generate(State(mock): State<MockOllama>) -> Json<serde_json::Value> {
    Json(json!({ "response": mock.generate_reply, "done": true }))
}

/// Hand-built multipart body with a single `file` part
pub fn multipart_upload(content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "farmmind-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"leaf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// Small solid-colour PNG
pub fn png_leaf(rgb: [u8; 3]) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(16, 16, image::Rgb(rgb));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
