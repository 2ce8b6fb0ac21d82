// file: src/fallback/groq.rs
// description: Groq chat-completions client used as the generative fallback
// reference: https://console.groq.com/docs/text-chat

use crate::config::FallbackConfig;
use crate::error::{ChatbotError, Result};
use crate::fallback::FallbackGenerator;
use crate::utils::OperationTimer;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqFallbackClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout_secs: u64,
}

impl GroqFallbackClient {
    pub fn new(
        api_key: String,
        model: String,
        endpoint: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ChatbotError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model,
            endpoint,
            timeout_secs,
        })
    }

    /// Builds a client when the fallback is enabled and has an API key.
    pub fn from_config(config: &FallbackConfig) -> Result<Option<Self>> {
        if !config.is_configured() {
            info!("Fallback generator not configured");
            return Ok(None);
        }

        let api_key = config.api_key.clone().unwrap_or_default();
        let client = Self::new(
            api_key,
            config.model.clone(),
            config.endpoint.clone(),
            config.timeout_secs,
        )?;

        info!("Fallback generator ready (model: {})", config.model);
        Ok(Some(client))
    }

    fn build_request<'a>(&'a self, question: &str, context: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: format!(
                        "Answer the user's question briefly using this context. \
                         If the context does not cover it, give a short general answer.\n\n\
                         Context: {}",
                        context
                    ),
                },
                ChatMessage {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            temperature: 0.2,
            max_tokens: 256,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> ChatbotError {
        if e.is_timeout() {
            ChatbotError::FallbackTimeout(self.timeout_secs)
        } else {
            ChatbotError::Fallback(format!("Failed to send Groq API request: {}", e))
        }
    }
}

#[async_trait]
impl FallbackGenerator for GroqFallbackClient {
    async fn generate(&self, question: &str, context: &str) -> Result<String> {
        let timer =
            OperationTimer::start("fallback generation").with_budget(Duration::from_secs(5));
        let request = self.build_request(question, context);

        debug!(
            "Requesting fallback answer from Groq API for {} chars",
            question.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatbotError::Fallback(format!(
                "Groq API request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ChatbotError::FallbackTimeout(self.timeout_secs)
            } else {
                ChatbotError::Fallback(format!("Failed to parse Groq API response: {}", e))
            }
        })?;

        timer.finish();

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ChatbotError::Fallback("No answer returned from Groq API".to_string()))
    }
}
