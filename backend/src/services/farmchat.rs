//! FarmGPT chat assistant
//!
//! Answers come from the local model when it is reachable and replies within
//! the deadline; otherwise from the keyword table with a fallback note.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::config::OllamaConfig;
use crate::error::{AppError, AppResult, UpstreamError, UpstreamResult};
use crate::external::ollama::{GenerationOptions, OllamaMessage};
use crate::external::OllamaClient;
use crate::AppState;
use shared::{fallback_response, validate_chat_message, ChatMessage, ChatResponse, ChatStatus};

const SYSTEM_PROMPT: &str = "You are FarmGPT, a knowledgeable and friendly rooftop farming assistant. \
Your role is to help users with urban farming, rooftop gardening, and plant care. \
Provide practical, actionable advice in 2-3 clear sentences. Be encouraging and helpful. \
Focus on topics like: watering, fertilizing, pest control, harvesting, soil management, \
temperature control, spacing, and disease prevention.";

const CHAT_OPTIONS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    num_predict: 200,
};

/// Replies this short or shorter are treated as unusable
pub const MIN_REPLY_CHARS: usize = 10;

/// Chat service
#[derive(Clone)]
pub struct FarmChatService {
    ollama: OllamaClient,
    config: OllamaConfig,
    permits: Arc<Semaphore>,
}

impl FarmChatService {
    /// Create a new FarmChatService instance
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

    /// Answer a message; only invalid input is an error
    pub async fn chat(&self, message: &ChatMessage) -> AppResult<ChatResponse> {
        validate_chat_message(&message.message)
            .map_err(|e| AppError::validation("message", e))?;

        tracing::info!("FarmChat message: {}", message.message);

        let response = match self.ask_model(message).await {
            Ok(reply) => {
                tracing::info!("Ollama replied with {} characters", reply.len());
                reply
            }
            Err(e) => {
                tracing::warn!("Using fallback chat response: {}", e);
                fallback_response(&message.message)
            }
        };

        Ok(ChatResponse {
            response,
            conversation_id: message.conversation_id(),
        })
    }

    /// Availability of the model backend
    pub async fn status(&self) -> ChatStatus {
        let available = self.ollama.is_available().await;
        if available {
            self.warn_missing_models().await;
        }

        ChatStatus::new(
            available,
            self.ollama.base_url(),
            self.ollama.text_model(),
            self.ollama.vision_model(),
        )
    }

    async fn warn_missing_models(&self) {
        match self.ollama.list_models().await {
            Ok(installed) => {
                for model in [self.ollama.text_model(), self.ollama.vision_model()] {
                    if !installed.iter().any(|name| name == model) {
                        tracing::warn!("Ollama model '{}' not installed. Run: ollama pull {}", model, model);
                    }
                }
            }
            Err(e) => tracing::debug!("Could not list Ollama models: {}", e),
        }
    }

    async fn ask_model(&self, message: &ChatMessage) -> UpstreamResult<String> {
        if !self.ollama.is_available().await {
            return Err(UpstreamError::Unreachable(format!(
                "liveness probe to {} failed",
                self.ollama.base_url()
            )));
        }

        let client = self.ollama.clone();
        let permits = self.permits.clone();
        let messages = build_messages(message);
        let timeout = self.config.chat_timeout();

        // Detached so a slow model cannot hold the request past the deadline
        let task = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| UpstreamError::PoolClosed)?;
            client
                .chat(client.text_model(), &messages, CHAT_OPTIONS, timeout)
                .await
        });

        let reply = await_within(self.config.chat_deadline(), task).await?;
        accept_reply(&reply)
    }
}

async fn await_within(
    deadline: Duration,
    task: tokio::task::JoinHandle<UpstreamResult<String>>,
) -> UpstreamResult<String> {
    match tokio::time::timeout(deadline, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(UpstreamError::Unreachable(format!("chat task failed: {}", e))),
        Err(_) => {
            tracing::warn!(
                "Ollama did not answer within {}s, abandoning request",
                deadline.as_secs()
            );
            Err(UpstreamError::Timeout)
        }
    }
}

/// System prompt, recent caller history, then the new message
fn build_messages(message: &ChatMessage) -> Vec<OllamaMessage> {
    let mut messages = vec![OllamaMessage::new("system", SYSTEM_PROMPT)];
    messages.extend(
        message
            .recent_history()
            .iter()
            .map(|turn| OllamaMessage::new(turn.role.as_str(), turn.content.clone())),
    );
    messages.push(OllamaMessage::new("user", message.message.clone()));
    messages
}

fn accept_reply(reply: &str) -> UpstreamResult<String> {
    let reply = reply.trim();
    if reply.chars().count() > MIN_REPLY_CHARS {
        Ok(reply.to_string())
    } else {
        Err(UpstreamError::MalformedResponse(format!(
            "reply too short: {:?}",
            reply
        )))
    }
}
