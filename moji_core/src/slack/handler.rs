use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use super::dto::{PostMessageRequest, PostMessageResponse};

/// Thin client over the one Web API method the bot needs.
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    api_url: String,
    bot_token: String,
}

impl SlackClient {
    pub fn new(api_url: &str, bot_token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("moji-server/0.1")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
        })
    }

    /// `chat.postMessage`. A response with `ok: false` is returned, not raised.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<String>,
    ) -> Result<PostMessageResponse> {
        let body = PostMessageRequest {
            channel: channel.to_string(),
            text: text.to_string(),
            thread_ts,
        };

        let response: PostMessageResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            log::error!(
                "chat.postMessage to {} rejected: {:?}",
                channel,
                response.error
            );
        }

        Ok(response)
    }
}
