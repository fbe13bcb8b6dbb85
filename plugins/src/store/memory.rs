use std::collections::BTreeMap;

use async_trait::async_trait;
use taskmgr_core::api::{name_matches, Task, TaskStore};
use tokio::sync::RwLock;

/// Process-local store; contents are lost on restart. `find_all` lists tasks
/// ordered by id.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<BTreeMap<String, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks.into_iter().map(|t| (t.id.clone(), t)).collect()),
        }
    }

    pub(crate) async fn snapshot(&self) -> Vec<Task> {
        self.tasks.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Task>> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Task>> {
        Ok(self.snapshot().await)
    }

    async fn find_by_name_containing(&self, pattern: &str) -> anyhow::Result<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| name_matches(t, pattern))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.tasks.read().await.contains_key(id))
    }

    async fn save(&self, task: Task) -> anyhow::Result<Task> {
        self.tasks
            .write()
            .await
            .insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn delete_by_id(&self, id: &str) -> anyhow::Result<()> {
        self.tasks.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_is_upsert() {
        let store = MemoryTaskStore::new();
        store.save(Task::new("a", "first", "o", "date")).await.unwrap();
        store.save(Task::new("a", "second", "o", "date")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "second");
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let store = MemoryTaskStore::with_tasks([
            Task::new("b", "n", "o", "ls"),
            Task::new("a", "n", "o", "ls"),
            Task::new("c", "n", "o", "ls"),
        ]);
        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_name_search_ignores_case() {
        let store = MemoryTaskStore::with_tasks([
            Task::new("1", "Nightly BACKUP", "o", "date"),
            Task::new("2", "report", "o", "date"),
        ]);
        let hits = store.find_by_name_containing("backup").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let store = MemoryTaskStore::with_tasks([Task::new("1", "n", "o", "date")]);
        assert!(store.exists_by_id("1").await.unwrap());
        store.delete_by_id("1").await.unwrap();
        assert!(!store.exists_by_id("1").await.unwrap());
        assert!(store.find_by_id("1").await.unwrap().is_none());
        // deleting again is a no-op
        store.delete_by_id("1").await.unwrap();
    }
}
