use std::env;

use super::dto::{AppConfig, AppEnv, KvBackend, MentionPolicy};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BOT_NAME: &str = "@動画より文字派";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-nano-2025-04-14";

impl AppConfig {
    /// Reads `.env` (if any) and the process environment once.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let env = match string("APP_ENV", "development").to_ascii_lowercase().as_str() {
            "production" | "prod" => AppEnv::Production,
            _ => AppEnv::Development,
        };

        // Mock summaries are never served in production.
        let mock_mode = env != AppEnv::Production && parse_bool(lookup("MOCK_MODE"));

        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let slack_mention_policy = match string("SLACK_MENTION_MATCH", "contains")
            .to_ascii_lowercase()
            .as_str()
        {
            "prefix" => MentionPolicy::Prefix,
            _ => MentionPolicy::Contains,
        };

        let default_backend = match env {
            AppEnv::Development => "memory",
            AppEnv::Production => "sled",
        };
        let kv_backend = match string("KV_BACKEND", default_backend)
            .to_ascii_lowercase()
            .as_str()
        {
            "sled" => KvBackend::Sled,
            _ => KvBackend::Memory,
        };

        Self {
            env,
            mock_mode,
            host: string("HOST", "0.0.0.0"),
            port,
            openai_api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            openai_base_url: string("OPENAI_BASE_URL", "https://api.openai.com/v1"),
            openai_model: string("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            slack_bot_token: string("SLACK_BOT_TOKEN", ""),
            slack_bot_name: string("SLACK_BOT_NAME", DEFAULT_BOT_NAME),
            slack_mention_policy,
            slack_api_url: string("SLACK_API_URL", "https://slack.com/api"),
            youtube_base_url: string("YOUTUBE_BASE_URL", "https://www.youtube.com"),
            caption_lang: string("CAPTION_LANG", "ja"),
            caption_fallback_lang: string("CAPTION_FALLBACK_LANG", "en"),
            kv_backend,
            sled_path: string("SLED_PATH", "moji_db"),
        }
    }

    pub fn log_summary(&self) {
        if self.is_development() {
            log::info!("Application settings:");
            log::info!("- env: {}", self.env);
            log::info!("- mock mode: {}", self.mock_mode);
            log::info!("- port: {}", self.port);
            log::info!("- kv backend: {}", self.kv_backend);
        } else {
            log::info!("動画より文字派！ API Server ({})", self.env);
        }
    }
}

fn parse_bool(value: Option<String>) -> bool {
    value
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.env, AppEnv::Development);
        assert!(!config.mock_mode);
        assert_eq!(config.port, 3000);
        assert_eq!(config.slack_bot_name, DEFAULT_BOT_NAME);
        assert_eq!(config.slack_mention_policy, MentionPolicy::Contains);
        assert_eq!(config.kv_backend, KvBackend::Memory);
        assert_eq!(config.caption_lang, "ja");
        assert_eq!(config.caption_fallback_lang, "en");
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_mock_mode_ignored_in_production() {
        let dev = config_from(&[("MOCK_MODE", "true")]);
        assert!(dev.mock_mode);

        let prod = config_from(&[("APP_ENV", "production"), ("MOCK_MODE", "true")]);
        assert!(!prod.mock_mode);
        assert_eq!(prod.kv_backend, KvBackend::Sled);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("SLACK_MENTION_MATCH", "prefix"),
            ("KV_BACKEND", "sled"),
            ("OPENAI_API_KEY", "  "),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.slack_mention_policy, MentionPolicy::Prefix);
        assert_eq!(config.kv_backend, KvBackend::Sled);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
