use async_trait::async_trait;

use crate::model::Task;

/// Document store holding tasks keyed by id.
#[async_trait]
pub trait TaskStore: Send + Sync {
    fn name(&self) -> &str;
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Task>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Task>>;
    /// Case-insensitive substring match on `name`.
    async fn find_by_name_containing(&self, pattern: &str) -> anyhow::Result<Vec<Task>>;
    async fn exists_by_id(&self, id: &str) -> anyhow::Result<bool>;
    /// Upsert by `task.id`.
    async fn save(&self, task: Task) -> anyhow::Result<Task>;
    async fn delete_by_id(&self, id: &str) -> anyhow::Result<()>;
}

/// Shared name filter so every store agrees on what "containing" means.
pub fn name_matches(task: &Task, pattern: &str) -> bool {
    task.name.to_lowercase().contains(&pattern.to_lowercase())
}
