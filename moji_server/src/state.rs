use std::sync::Arc;

use anyhow::Result;
use moji_core::{
    config::dto::AppConfig,
    kv_store::{handler::ApiKeyStore, storage::KvStore},
    slack::{handler::SlackClient, seen_events::SeenEvents},
    summarizer::handler::SummarizerClient,
    youtube::handler::CaptionFetcher,
};

#[derive(Clone)]
pub struct ServerState {
    config: AppConfig,
    captions: CaptionFetcher,
    summarizer: SummarizerClient,
    api_keys: ApiKeyStore,
    seen_events: SeenEvents,
    slack: SlackClient,
}

impl ServerState {
    pub fn new(config: AppConfig, kv_store: Arc<dyn KvStore>) -> Result<Self> {
        let captions = CaptionFetcher::new(
            &config.youtube_base_url,
            &config.caption_lang,
            &config.caption_fallback_lang,
        )?;
        let summarizer = SummarizerClient::new(&config)?;
        let slack = SlackClient::new(&config.slack_api_url, &config.slack_bot_token)?;

        Ok(Self {
            captions,
            summarizer,
            slack,
            api_keys: ApiKeyStore::new(kv_store),
            seen_events: SeenEvents::default(),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn captions(&self) -> &CaptionFetcher {
        &self.captions
    }

    pub fn summarizer(&self) -> &SummarizerClient {
        &self.summarizer
    }

    pub fn api_keys(&self) -> &ApiKeyStore {
        &self.api_keys
    }

    pub fn seen_events(&self) -> &SeenEvents {
        &self.seen_events
    }

    pub fn slack(&self) -> &SlackClient {
        &self.slack
    }
}
