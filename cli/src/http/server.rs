//! HTTP服务器生命周期管理

use super::{
    middleware::{create_middleware_stack, request_logger},
    routes::create_router,
    AppState,
};
use crate::commands::cli::ServeArgs;
use axum::middleware;
use std::net::SocketAddr;
use taskmgr_core::api::{AppContext, CliError};
use tokio::signal;
use tracing::info;
use uuid::Uuid;

/// HTTP服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// CLI flags win over the config file.
    pub fn resolve(args: &ServeArgs, ctx: &AppContext) -> Self {
        let config = &ctx.cfg().http_server;
        Self {
            host: args.host.clone().unwrap_or_else(|| config.host.clone()),
            port: args.port.unwrap_or(config.port),
        }
    }
}

/// 处理 serve 命令
pub async fn handle_serve(args: ServeArgs, ctx: &AppContext) -> Result<(), CliError> {
    let session_id = Uuid::new_v4().to_string();
    let config = ServerConfig::resolve(&args, ctx);

    let tasks = ctx.build_task_service().await?;
    info!(
        store = tasks.store_name(),
        timeout_secs = tasks.executor().timeout().as_secs(),
        "task service ready"
    );

    let state = AppState::new(session_id, tasks);

    start_server_with_config(config, state)
        .await
        .map_err(|e: Box<dyn std::error::Error + Send + Sync>| CliError::Server(e.to_string()))
}

/// 使用自定义配置启动HTTP服务器
pub async fn start_server_with_config(
    config: ServerConfig,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!(
        "Starting HTTP server on {}:{} (session: {})",
        config.host, config.port, state.session_id
    );

    let execution_timeout = state.tasks.executor().timeout();
    let app = create_router(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), request_logger))
        .layer(create_middleware_stack(execution_timeout));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C signal");
                }
                _ = wait_for_sigterm() => {
                    info!("Received SIGTERM signal");
                }
            }

            info!("Starting graceful shutdown...");
        })
        .await?;

    if let Ok(stats) = state.stats.read() {
        info!(
            requests_total = stats.requests_total,
            errors_total = stats.errors_total,
            uptime_secs = stats.uptime_seconds(),
            "Server shutdown complete"
        );
    }

    Ok(())
}

/// 等待 SIGTERM 信号（Unix系统）
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to setup SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// Windows 系统不支持 SIGTERM，使用空操作
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
