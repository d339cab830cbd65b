use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::AssistantError;
use crate::config::AiConfig;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);
const TEMPERATURE: f32 = 0.2;

/// Prompt sent to the model, optionally with an image for OCR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    /// `https://` or `data:` URL of an image the model should read.
    pub image_url: Option<String>,
}

/// Text-completion oracle the assistants are built on.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

/// OpenAI chat-completions client with bounded exponential-backoff retries.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl OpenAiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            max_retries: config.max_retries,
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_once(
        &self,
        api_key: &str,
        body: &ChatRequest<'_>,
    ) -> Result<String, AssistantError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ChatResponse = response.json().await?;
        if let Some(usage) = &payload.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "model call succeeded"
            );
        }

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistantError::EmptyContent)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::NotConfigured)?;
        let body = ChatRequest::from_request(&self.model, request);
        let attempts = self.max_retries.saturating_add(1);

        let mut attempt = 0;
        loop {
            match self.send_once(api_key, &body).await {
                Ok(content) => return Ok(content),
                Err(err) if err.is_transient() && attempt + 1 < attempts => {
                    let delay = backoff_delay(self.retry_base_delay, attempt);
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "model call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_transient() && attempts > 1 => {
                    return Err(AssistantError::RetriesExhausted {
                        attempts,
                        last: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Exponential backoff for the given zero-based attempt, capped at `MAX_RETRY_DELAY`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    2u32.checked_pow(attempt)
        .and_then(|factor| base.checked_mul(factor))
        .map_or(MAX_RETRY_DELAY, |delay| delay.min(MAX_RETRY_DELAY))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

impl<'a> ChatRequest<'a> {
    fn from_request(model: &'a str, request: &CompletionRequest) -> Self {
        let user_content = match &request.image_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.prompt.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: url.clone() },
                },
            ]),
            None => MessageContent::Text(request.prompt.clone()),
        };

        Self {
            model,
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system.clone()),
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
