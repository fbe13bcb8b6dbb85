//! HTTP服务器状态管理

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use taskmgr_core::api::TaskService;

/// 应用状态（在所有handlers间共享）
#[derive(Clone)]
pub struct AppState {
    pub session_id: String,
    pub tasks: Arc<TaskService>,
    pub stats: Arc<RwLock<ServerStats>>,
}

impl AppState {
    pub fn new(session_id: String, tasks: TaskService) -> Self {
        Self {
            session_id,
            tasks: Arc::new(tasks),
            stats: Arc::new(RwLock::new(ServerStats::new())),
        }
    }
}

/// 服务器统计信息
pub struct ServerStats {
    pub requests_total: u64,
    pub requests_by_endpoint: HashMap<String, u64>,
    pub errors_total: u64,
    pub start_time: DateTime<Local>,
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            requests_total: 0,
            requests_by_endpoint: HashMap::new(),
            errors_total: 0,
            start_time: Local::now(),
        }
    }

    pub fn record(&mut self, endpoint: &str, failed: bool) {
        self.requests_total += 1;
        *self
            .requests_by_endpoint
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
        if failed {
            self.errors_total += 1;
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        let now = Local::now();
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_stats_new() {
        let stats = ServerStats::new();
        assert_eq!(stats.requests_total, 0);
        assert_eq!(stats.errors_total, 0);
        assert!(stats.uptime_seconds() < 1.0);
    }

    #[test]
    fn test_record_counts_requests_and_errors() {
        let mut stats = ServerStats::new();
        stats.record("PUT /tasks", false);
        stats.record("PUT /tasks", true);
        stats.record("GET /tasks/health", false);

        assert_eq!(stats.requests_total, 3);
        assert_eq!(stats.errors_total, 1);
        assert_eq!(stats.requests_by_endpoint["PUT /tasks"], 2);
        assert_eq!(stats.requests_by_endpoint["GET /tasks/health"], 1);
    }
}
