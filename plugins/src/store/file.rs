use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use taskmgr_core::api::{Task, TaskStore};
use tracing::{debug, info};

use super::memory::MemoryTaskStore;

/// JSON document file holding every task. Reads are served from memory; each
/// mutation rewrites the whole file through a temp file and a rename, and
/// reaches memory only once that write succeeded.
pub struct FileTaskStore {
    path: PathBuf,
    inner: MemoryTaskStore,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileTaskStore {
    /// Loads `path` if it exists. A missing or empty file starts an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let tasks = match tokio::fs::read_to_string(&path).await {
            Ok(s) if s.trim().is_empty() => Vec::new(),
            Ok(s) => serde_json::from_str::<Vec<Task>>(&s)
                .with_context(|| format!("corrupt task file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read task file {}", path.display()))
            }
        };

        info!(path = %path.display(), count = tasks.len(), "task file loaded");
        Ok(Self {
            path,
            inner: MemoryTaskStore::with_tasks(tasks),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current contents keyed by id. Callers hold `write_lock`, so this stays
    /// in step with `inner` until they commit.
    async fn staged(&self) -> BTreeMap<String, Task> {
        self.inner
            .snapshot()
            .await
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect()
    }

    async fn persist(&self, tasks: &BTreeMap<String, Task>) -> anyhow::Result<()> {
        let tasks: Vec<&Task> = tasks.values().collect();
        let json = serde_json::to_string_pretty(&tasks)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = tasks.len(), "task file written");
        Ok(())
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Task>> {
        self.inner.find_all().await
    }

    async fn find_by_name_containing(&self, pattern: &str) -> anyhow::Result<Vec<Task>> {
        self.inner.find_by_name_containing(pattern).await
    }

    async fn exists_by_id(&self, id: &str) -> anyhow::Result<bool> {
        self.inner.exists_by_id(id).await
    }

    async fn save(&self, task: Task) -> anyhow::Result<Task> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.staged().await;
        tasks.insert(task.id.clone(), task.clone());
        self.persist(&tasks).await?;
        self.inner.save(task).await
    }

    async fn delete_by_id(&self, id: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tasks = self.staged().await;
        if tasks.remove(id).is_none() {
            return Ok(());
        }
        self.persist(&tasks).await?;
        self.inner.delete_by_id(id).await
    }
}
