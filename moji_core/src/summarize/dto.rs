use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::SummarizeError;

/// Body of `POST /summarize`, decoded permissively so an unknown mode can be
/// reported as such instead of as a malformed body.
#[derive(Deserialize, Serialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    /// `youtube` or `manual`
    #[serde(default)]
    pub mode: String,
    pub video_id: Option<String>,
    pub text: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummarizeInput {
    Youtube { video_id: String },
    Manual { text: String },
}

#[derive(Deserialize, Serialize, Debug, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum SummarizeResponse {
    Success { success: bool, summary: String },
    Failure { success: bool, error: String },
}

impl SummarizeResponse {
    pub fn success(summary: String) -> Self {
        SummarizeResponse::Success {
            success: true,
            summary,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        SummarizeResponse::Failure {
            success: false,
            error: error.into(),
        }
    }
}

impl TryFrom<&SummarizeRequest> for SummarizeInput {
    type Error = SummarizeError;

    fn try_from(request: &SummarizeRequest) -> Result<Self, Self::Error> {
        match request.mode.as_str() {
            "youtube" => {
                let video_id = request
                    .video_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .ok_or(SummarizeError::MissingVideoId)?;

                Ok(SummarizeInput::Youtube {
                    video_id: video_id.to_string(),
                })
            }
            "manual" => {
                let text = request
                    .text
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
                    .ok_or(SummarizeError::MissingInput)?;

                Ok(SummarizeInput::Manual {
                    text: text.to_string(),
                })
            }
            other => Err(SummarizeError::InvalidMode(other.to_string())),
        }
    }
}
