use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

use super::helpers::{
    caption_span, join_caption_text, parse_caption_tracks, parse_timed_text, select_track,
};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; moji-server/0.1)";

/// Scrapes caption text for a video, trying a primary then a fallback language.
#[derive(Clone)]
pub struct CaptionFetcher {
    client: Client,
    base_url: String,
    primary_lang: String,
    fallback_lang: String,
}

impl CaptionFetcher {
    pub fn new(base_url: &str, primary_lang: &str, fallback_lang: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            primary_lang: primary_lang.to_string(),
            fallback_lang: fallback_lang.to_string(),
        })
    }

    /// Joined caption text for `video_id`.
    ///
    /// A language without a caption track counts as empty and moves on to the
    /// fallback language. Any transport or parse failure ends the attempt
    /// immediately, without trying the fallback.
    pub async fn get_captions_text(&self, video_id: &str) -> Result<String> {
        let text = self
            .fetch_language(video_id, &self.primary_lang)
            .await?
            .unwrap_or_default();

        if !text.is_empty() {
            return Ok(text);
        }

        log::info!(
            "No {} captions for {}, retrying with {}",
            self.primary_lang,
            video_id,
            self.fallback_lang
        );

        let text = self
            .fetch_language(video_id, &self.fallback_lang)
            .await?
            .unwrap_or_default();

        if text.is_empty() {
            return Err(anyhow::anyhow!("No captions found for video {}", video_id));
        }

        Ok(text)
    }

    /// `Ok(None)` when the video has no track in `lang`.
    pub async fn fetch_language(&self, video_id: &str, lang: &str) -> Result<Option<String>> {
        let page = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let tracks = parse_caption_tracks(&page)?;
        let Some(track) = select_track(&tracks, lang) else {
            log::debug!("Video {} has no {} caption track", video_id, lang);
            return Ok(None);
        };

        let xml = self
            .client
            .get(&track.base_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let lines = parse_timed_text(&xml)?;
        log::debug!(
            "Parsed {} {} caption lines covering {:.0}s of {}",
            lines.len(),
            lang,
            caption_span(&lines),
            video_id
        );

        Ok(Some(join_caption_text(&lines)))
    }
}
