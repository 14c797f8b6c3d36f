use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvBackend {
    Memory,
    Sled,
}

/// How a Slack message text is matched against the bot mention string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionPolicy {
    /// Text must start with the mention.
    Prefix,
    /// Text may carry the mention anywhere.
    Contains,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: AppEnv,
    pub mock_mode: bool,
    pub host: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub slack_bot_token: String,
    pub slack_bot_name: String,
    pub slack_mention_policy: MentionPolicy,
    pub slack_api_url: String,
    pub youtube_base_url: String,
    pub caption_lang: String,
    pub caption_fallback_lang: String,
    pub kv_backend: KvBackend,
    pub sled_path: String,
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.env == AppEnv::Development
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Development => write!(f, "development"),
            AppEnv::Production => write!(f, "production"),
        }
    }
}

impl fmt::Display for KvBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KvBackend::Memory => write!(f, "memory"),
            KvBackend::Sled => write!(f, "sled"),
        }
    }
}
