use std::sync::Arc;

use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};

use super::storage::KvStore;

/// Per-user OpenAI keys registered through the Slack slash commands.
///
/// Values are base64 encoded before they reach the store. That only keeps keys
/// from showing up as plain text in a dump; it is not encryption.
#[derive(Clone)]
pub struct ApiKeyStore {
    store: Arc<dyn KvStore>,
}

impl ApiKeyStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn get_api_key(&self, user_id: &str) -> Result<Option<String>> {
        let Some(encoded) = self.store.get(&user_key(user_id))? else {
            return Ok(None);
        };

        if encoded.is_empty() {
            return Ok(None);
        }

        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| anyhow::anyhow!("Stored key for {} is not valid base64: {}", user_id, e))?;

        Ok(Some(String::from_utf8(bytes)?))
    }

    pub fn set_api_key(&self, user_id: &str, api_key: &str) -> Result<()> {
        self.store.set(&user_key(user_id), &STANDARD.encode(api_key))
    }

    pub fn delete_api_key(&self, user_id: &str) -> Result<()> {
        self.store.delete(&user_key(user_id))
    }
}

pub fn user_key(user_id: &str) -> String {
    format!("user:{}", user_id)
}
