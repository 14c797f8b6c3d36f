use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Outer Events API payload. Every field is optional so URL verification,
/// retries and real events all decode through the same type.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SlackEnvelope {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub challenge: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_id: Option<String>,
    pub event_time: Option<i64>,
    pub event: Option<SlackEvent>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SlackEvent {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subtype: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thread_ts: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ts: Option<String>,
}

/// Events like `user_change` carry objects where messages carry ids; those
/// fields read as absent instead of failing the whole payload.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

/// Form body Slack sends for slash commands.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SlackCommandForm {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    pub error: Option<String>,
}
