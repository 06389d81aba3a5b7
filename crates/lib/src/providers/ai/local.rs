use crate::{
    constants::{AI_REQUEST_TIMEOUT_SECS, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE},
    errors::{is_rate_limit_message, ExtractError},
    providers::ai::{AiProvider, CompletionOutput},
};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct LocalAiRequest<'a> {
    messages: Vec<LocalAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    temperature: f32,
    max_tokens: i32,
    stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct LocalAiMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize, Debug)]
struct LocalAiResponse {
    #[serde(default)]
    choices: Vec<LocalAiChoice>,
}

#[derive(Deserialize, Debug)]
struct LocalAiChoice {
    message: LocalAiMessage,
}

// --- Local Provider implementation ---

/// A provider for interacting with a local or OpenAI-compatible API.
#[derive(Clone, Debug)]
pub struct LocalAiProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: Option<String>,
}

impl LocalAiProvider {
    /// Creates a new `LocalAiProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, ExtractError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(AI_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ExtractError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl AiProvider for LocalAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<CompletionOutput, ExtractError> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.trim().is_empty() {
            messages.push(LocalAiMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            });
        }
        messages.push(LocalAiMessage {
            role: "user".to_string(),
            content: user_prompt.to_string(),
        });

        let request_body = LocalAiRequest {
            messages,
            model: self.model.as_deref(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            stream: false,
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                request_builder = request_builder.bearer_auth(key);
            }
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(ExtractError::AiRequest)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_message(&error_text) {
                return Err(ExtractError::RateLimited(error_text));
            }
            return Err(ExtractError::AiApi {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let local_ai_response: LocalAiResponse = response
            .json()
            .await
            .map_err(ExtractError::AiDeserialization)?;

        let output = local_ai_response
            .choices
            .into_iter()
            .next()
            .map(|c| CompletionOutput::Message {
                role: c.message.role,
                content: c.message.content,
            })
            .unwrap_or_else(|| CompletionOutput::Text(String::new()));

        Ok(output)
    }
}
