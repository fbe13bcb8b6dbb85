use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, owned shell command plus its execution history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub command: String,
    /// Append-only, in execution order.
    #[serde(default)]
    pub task_executions: Vec<ExecutionRecord>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
            command: command.into(),
            task_executions: Vec::new(),
        }
    }

    pub fn push_execution(&mut self, record: ExecutionRecord) {
        self.task_executions.push(record);
    }
}

/// One run of a task's command. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    #[serde(with = "crate::model::time_format")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::model::time_format")]
    pub end_time: DateTime<Utc>,
    /// Stdout on success; failures are encoded in-band (`Error: ...`).
    pub output: String,
}

impl ExecutionRecord {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>, output: String) -> Self {
        Self {
            start_time,
            end_time,
            output,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

/// Body of `PUT /tasks`. Fields are optional on the wire so that a missing
/// field is reported like a blank one instead of as a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreateRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

impl TaskCreateRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            owner: Some(owner.into()),
            command: Some(command.into()),
        }
    }

    /// Field name → message for every missing or blank field.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let checks = [
            ("id", &self.id, "Task ID is required"),
            ("name", &self.name, "Task name is required"),
            ("owner", &self.owner, "Task owner is required"),
            ("command", &self.command, "Command is required"),
        ];

        checks
            .into_iter()
            .filter(|(_, value, _)| is_blank(value.as_deref()))
            .map(|(field, _, msg)| (field.to_string(), msg.to_string()))
            .collect()
    }

    /// Builds a task with empty history. Call only after [`Self::field_errors`]
    /// came back empty.
    pub fn into_task(self) -> Task {
        Task::new(
            self.id.unwrap_or_default(),
            self.name.unwrap_or_default(),
            self.owner.unwrap_or_default(),
            self.command.unwrap_or_default(),
        )
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
