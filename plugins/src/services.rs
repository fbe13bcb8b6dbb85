//! ServicesFactory implementation: builds the configured store for the CLI.
use async_trait::async_trait;
use taskmgr_core::api::{AppConfig, Services, ServicesFactory};
use tracing::info;

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services> {
        let store = factory::build_store(cfg).await?;
        info!(store = store.name(), "services built");
        Ok(Services { store })
    }
}
