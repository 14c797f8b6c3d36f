use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use super::dto::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::helpers::{SYSTEM_PROMPT, build_user_prompt, mock_summary};
use crate::config::dto::AppConfig;
use crate::helpers::messages;
use crate::summarize::error::SummarizeError;

const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 1500;

#[derive(Clone)]
pub struct SummarizerClient {
    client: Client,
    base_url: String,
    model: String,
    mock_mode: bool,
    fallback_to_mock: bool,
}

impl SummarizerClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("moji-server/0.1")
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: config.openai_base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
            mock_mode: config.mock_mode,
            fallback_to_mock: config.is_development(),
        })
    }

    pub fn is_mock(&self) -> bool {
        self.mock_mode
    }

    /// Summarizes `text` with the caller's key. In mock mode nothing leaves the process.
    pub async fn summarize(&self, api_key: &str, text: &str) -> Result<String, SummarizeError> {
        if self.mock_mode {
            log::info!("Mock mode: returning canned summary without calling the API");
            return Ok(mock_summary(text).to_string());
        }

        match self.complete(api_key, text).await {
            Ok(summary) => Ok(summary),
            Err(e) if self.fallback_to_mock => {
                log::error!("Summarization failed: {}", e);
                log::warn!("Development mode: falling back to the canned summary");
                Ok(mock_summary(text).to_string())
            }
            Err(e) => {
                log::error!("Summarization failed: {}", e);
                Err(e)
            }
        }
    }

    async fn complete(&self, api_key: &str, text: &str) -> Result<String, SummarizeError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_user_prompt(text)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizeError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                code: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&body).ok().map(|b| b.error);

            return Err(SummarizeError::Upstream {
                status: Some(status.as_u16()),
                code: detail.as_ref().and_then(|d| d.code.clone().or(d.error_type.clone())),
                message: detail
                    .and_then(|d| d.message)
                    .unwrap_or_else(|| status.to_string()),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| SummarizeError::Upstream {
                status: None,
                code: None,
                message: format!("Failed to parse completion: {}", e),
            })?;

        let summary = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| messages::EMPTY_COMPLETION.to_string());

        Ok(summary)
    }
}
