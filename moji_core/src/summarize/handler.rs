use super::dto::{SummarizeInput, SummarizeRequest};
use super::error::SummarizeError;
use crate::summarizer::handler::SummarizerClient;
use crate::youtube::handler::CaptionFetcher;

/// Validates a popup request, gathers its text and summarizes it.
pub async fn summarize_request(
    fetcher: &CaptionFetcher,
    summarizer: &SummarizerClient,
    server_api_key: Option<&str>,
    request: &SummarizeRequest,
) -> Result<String, SummarizeError> {
    let input = SummarizeInput::try_from(request)?;
    let api_key = resolve_api_key(
        request.api_key.as_deref(),
        server_api_key,
        summarizer.is_mock(),
    )?;

    let text = acquire_text(fetcher, &input).await?;

    summarizer.summarize(&api_key, &text).await
}

/// The caller's key wins; the server key is only a fallback. Mock mode needs neither.
pub fn resolve_api_key(
    request_key: Option<&str>,
    server_key: Option<&str>,
    mock_mode: bool,
) -> Result<String, SummarizeError> {
    let key = request_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or_else(|| server_key.map(str::trim).filter(|key| !key.is_empty()));

    match key {
        Some(key) => Ok(key.to_string()),
        None if mock_mode => Ok(String::new()),
        None => Err(SummarizeError::MissingApiKey),
    }
}

pub async fn acquire_text(
    fetcher: &CaptionFetcher,
    input: &SummarizeInput,
) -> Result<String, SummarizeError> {
    match input {
        SummarizeInput::Manual { text } => Ok(text.clone()),
        SummarizeInput::Youtube { video_id } => fetch_captions(fetcher, video_id).await,
    }
}

pub async fn fetch_captions(
    fetcher: &CaptionFetcher,
    video_id: &str,
) -> Result<String, SummarizeError> {
    fetcher.get_captions_text(video_id).await.map_err(|e| {
        log::error!("Failed to fetch captions for {}: {}", video_id, e);
        SummarizeError::CaptionsUnavailable {
            video_id: video_id.to_string(),
        }
    })
}
