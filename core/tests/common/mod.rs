use taskmgr_core::api::{Task, TaskExecutor};

pub fn task(id: &str, command: &str) -> Task {
    Task::new(id, format!("task {id}"), "integration", command)
}

pub fn fast_executor(timeout_secs: u64) -> TaskExecutor {
    TaskExecutor::default().with_timeout(std::time::Duration::from_secs(timeout_secs))
}
