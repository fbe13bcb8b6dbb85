//! HTTP服务器模块 - 暴露任务管理REST API

pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use models::*;
pub use server::*;
pub use state::*;
