//! Task service: CRUD over the store plus execute-and-record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;
use tracing::info;

use crate::error::TaskError;
use crate::executor::TaskExecutor;
use crate::model::{ExecutionRecord, Task, TaskCreateRequest};
use crate::store::TaskStore;
use crate::validator;

pub struct TaskService {
    store: Arc<dyn TaskStore>,
    executor: TaskExecutor,
    /// One async mutex per task id. Held across every read-modify-write of a
    /// task so concurrent executions cannot drop each other's records. An
    /// entry lives only while someone holds or waits for it.
    task_locks: TaskLocks,
}

type TaskLocks = Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>;

/// Releases the task mutex and drops the map entry once nobody else is
/// holding or waiting on it.
struct TaskLockGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a TaskLocks,
    id: String,
}

impl Drop for TaskLockGuard<'_> {
    fn drop(&mut self) {
        // Map lock first: nobody can clone the entry between release and check.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        self.guard.take();
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.id);
        }
    }
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, executor: TaskExecutor) -> Self {
        Self {
            store,
            executor,
            task_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub fn executor(&self) -> &TaskExecutor {
        &self.executor
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, TaskError> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Upsert. An existing task keeps its execution history.
    pub async fn create_or_update(&self, req: TaskCreateRequest) -> Result<Task, TaskError> {
        let field_errors = req.field_errors();
        if !field_errors.is_empty() {
            return Err(TaskError::Validation {
                message: "Invalid input provided".into(),
                field_errors,
            });
        }

        let mut task = req.into_task();
        if let Some(reason) = validator::unsafe_reason(task.command.as_str()) {
            return Err(TaskError::CommandRejected(reason));
        }

        let _guard = self.lock_task(&task.id).await;
        let existing = self.store.find_by_id(&task.id).await?;
        let updated = existing.is_some();
        if let Some(existing) = existing {
            task.task_executions = existing.task_executions;
        }

        let saved = self.store.save(task).await?;
        info!(task_id = %saved.id, updated, "task saved");
        Ok(saved)
    }

    /// Returns `false` when no task has this id.
    pub async fn delete_task(&self, id: &str) -> Result<bool, TaskError> {
        let _guard = self.lock_task(id).await;
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(true)
    }

    pub async fn find_by_name(&self, pattern: &str) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.find_by_name_containing(pattern).await?)
    }

    /// Runs the task's command and appends the record to its history.
    pub async fn execute_task(&self, id: &str) -> Result<ExecutionRecord, TaskError> {
        let _guard = self.lock_task(id).await;
        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::task_not_found(id))?;

        let record = self.executor.execute(&task).await?;
        task.push_execution(record.clone());
        self.store.save(task).await?;
        Ok(record)
    }

    pub async fn executions(&self, id: &str) -> Result<Vec<ExecutionRecord>, TaskError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|task| task.task_executions)
            .ok_or_else(|| TaskError::task_not_found(id))
    }

    pub fn is_command_safe(&self, command: &str) -> bool {
        validator::is_safe(command)
    }

    async fn lock_task(&self, id: &str) -> TaskLockGuard<'_> {
        // Built before waiting so a cancelled waiter still prunes its entry.
        let mut pending = TaskLockGuard {
            guard: None,
            locks: &self.task_locks,
            id: id.to_string(),
        };
        let lock = {
            let mut locks = self
                .task_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            locks.entry(id.to_string()).or_default().clone()
        };
        pending.guard = Some(lock.lock_owned().await);
        pending
    }

    #[cfg(test)]
    fn lock_entries(&self) -> usize {
        self.task_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
