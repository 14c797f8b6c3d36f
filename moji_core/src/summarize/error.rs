use thiserror::Error;

use crate::helpers::messages;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),
    #[error("no text to summarize")]
    MissingInput,
    #[error("no video id")]
    MissingVideoId,
    #[error("no API key")]
    MissingApiKey,
    #[error("captions unavailable for {video_id}")]
    CaptionsUnavailable { video_id: String },
    #[error("upstream call failed (status {status:?}, code {code:?}): {message}")]
    Upstream {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },
}

/// What went wrong upstream, as far as the caller can act on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    AuthInvalid,
    QuotaExceeded,
    InsufficientQuota,
    Generic,
}

impl UpstreamFailure {
    pub fn classify(status: Option<u16>, code: Option<&str>) -> Self {
        match (status, code) {
            (Some(429), _) => UpstreamFailure::QuotaExceeded,
            (Some(401), _) => UpstreamFailure::AuthInvalid,
            (_, Some("insufficient_quota")) => UpstreamFailure::InsufficientQuota,
            _ => UpstreamFailure::Generic,
        }
    }
}

impl SummarizeError {
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizeError::InvalidMode(_)
            | SummarizeError::MissingInput
            | SummarizeError::MissingVideoId
            | SummarizeError::MissingApiKey
            | SummarizeError::CaptionsUnavailable { .. } => 400,
            SummarizeError::Upstream { status, .. } => status.unwrap_or(500),
        }
    }

    pub fn upstream_failure(&self) -> Option<UpstreamFailure> {
        match self {
            SummarizeError::Upstream { status, code, .. } => {
                Some(UpstreamFailure::classify(*status, code.as_deref()))
            }
            _ => None,
        }
    }

    /// Message shown to the popup user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SummarizeError::InvalidMode(_) => messages::INVALID_MODE,
            SummarizeError::MissingInput => messages::ENTER_TEXT,
            SummarizeError::MissingVideoId => messages::ENTER_VIDEO_ID,
            SummarizeError::MissingApiKey => messages::ENTER_API_KEY,
            SummarizeError::CaptionsUnavailable { .. } => messages::CAPTIONS_UNAVAILABLE,
            SummarizeError::Upstream { .. } => match self.upstream_failure() {
                Some(UpstreamFailure::AuthInvalid) => messages::API_KEY_INVALID,
                Some(UpstreamFailure::QuotaExceeded) => messages::QUOTA_EXCEEDED,
                Some(UpstreamFailure::InsufficientQuota) => messages::INSUFFICIENT_QUOTA,
                _ => messages::SUMMARIZE_FAILED,
            },
        }
    }
}
