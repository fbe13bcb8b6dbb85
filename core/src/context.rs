use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::CliError;
use crate::executor::TaskExecutor;
use crate::service::TaskService;
use crate::store::TaskStore;

#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn TaskStore>,
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services_factory: Option<Arc<dyn ServicesFactory>>) -> Self {
        Self {
            cfg,
            services_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn with_config(&self, cfg: AppConfig) -> Self {
        Self {
            cfg,
            services_factory: self.services_factory.clone(),
        }
    }

    pub async fn build_services(&self) -> Result<Services, CliError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Err(CliError::Config(
                "services_factory missing (cannot build store)".into(),
            ));
        };
        factory.build_services(&self.cfg).await.map_err(CliError::Anyhow)
    }

    /// Wires the configured store and executor into a [`TaskService`].
    pub async fn build_task_service(&self) -> Result<TaskService, CliError> {
        let services = self.build_services().await?;
        Ok(TaskService::new(
            services.store,
            TaskExecutor::new(&self.cfg.executor),
        ))
    }
}
