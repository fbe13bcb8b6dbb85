use std::sync::Arc;

use anyhow::Result;
use taskmgr_core::api::{AppConfig, StoreProvider, TaskStore};

use crate::store::{FileTaskStore, MemoryTaskStore};

pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn TaskStore>> {
    match cfg.store.provider {
        StoreProvider::Memory => Ok(Arc::new(MemoryTaskStore::new())),
        StoreProvider::File => {
            let path = cfg.store.path.trim();
            if path.is_empty() {
                anyhow::bail!("store.path is required for the file provider");
            }
            Ok(Arc::new(FileTaskStore::open(path).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_config_builds_memory_store() {
        let store = build_store(&AppConfig::default()).await.unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn test_file_provider_needs_a_path() {
        let mut cfg = AppConfig::default();
        cfg.store.provider = StoreProvider::File;
        assert!(build_store(&cfg).await.is_err());

        let dir = tempfile::tempdir().unwrap();
        cfg.store.path = dir.path().join("tasks.json").to_string_lossy().to_string();
        let store = build_store(&cfg).await.unwrap();
        assert_eq!(store.name(), "file");
    }
}
