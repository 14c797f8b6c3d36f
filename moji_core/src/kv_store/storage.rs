use std::sync::Arc;

use anyhow::Result;
use dashmap::DashMap;
use sled::{Db, Tree};

use crate::config::dto::{AppConfig, KvBackend};

const TREE_NAME: &str = "api_keys";

/// Minimal string key-value capability the credential store is built on.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// Process-local store used in development and tests.
#[derive(Default)]
pub struct MemoryKv {
    entries: DashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Clone)]
pub struct SledKv {
    tree: Tree,
}

impl SledKv {
    pub fn new(db: &Db) -> Result<Self> {
        let tree = db.open_tree(TREE_NAME)?;
        Ok(Self { tree })
    }

    pub fn open(path: &str) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open sled database at {}: {}", path, e))?;
        Self::new(&db)
    }
}

impl KvStore for SledKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.tree.get(key)? {
            Some(bytes) => Ok(Some(String::from_utf8(bytes.to_vec())?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.tree.insert(key, value.as_bytes())?;
        self.tree.flush()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.tree.remove(key)?;
        self.tree.flush()?;
        Ok(())
    }
}

/// Picks the backend once at startup. A sled database that cannot be opened
/// degrades to the in-memory store so the server still comes up.
pub fn open_kv_store(config: &AppConfig) -> Arc<dyn KvStore> {
    match config.kv_backend {
        KvBackend::Memory => {
            log::info!("Using in-memory key-value store");
            Arc::new(MemoryKv::new())
        }
        KvBackend::Sled => match SledKv::open(&config.sled_path) {
            Ok(store) => {
                log::info!("Using sled key-value store at {}", config.sled_path);
                Arc::new(store)
            }
            Err(e) => {
                log::error!("Failed to initialise sled store: {}", e);
                log::warn!("Falling back to in-memory key-value store");
                Arc::new(MemoryKv::new())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn exercise(store: &dyn KvStore) {
        assert_eq!(store.get("user:U1").unwrap(), None);

        store.set("user:U1", "first").unwrap();
        assert_eq!(store.get("user:U1").unwrap(), Some("first".to_string()));

        store.set("user:U1", "second").unwrap();
        assert_eq!(store.get("user:U1").unwrap(), Some("second".to_string()));

        store.delete("user:U1").unwrap();
        assert_eq!(store.get("user:U1").unwrap(), None);

        // deleting a missing key is not an error
        store.delete("user:U2").unwrap();
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryKv::new());
    }

    #[test]
    fn test_sled_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = SledKv::open(temp_dir.path().to_str().unwrap()).unwrap();
        exercise(&store);
    }
}
