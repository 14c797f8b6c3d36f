use serde::{Deserialize, Serialize};

/// One entry of the watch page's `captionTracks` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub vss_id: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLine {
    pub start: f64,
    pub dur: f64,
    pub text: String,
}
