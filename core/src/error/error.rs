use std::collections::BTreeMap;

use thiserror::Error;

use super::executor::ExecutorError;
use crate::validator::UnsafeReason;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Failures surfaced by [`crate::service::TaskService`].
///
/// Soft execution failures (spawn or pipe errors) never show up here; they are
/// folded into the returned [`crate::model::ExecutionRecord`] instead.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Missing or blank input. `field_errors` is keyed by field name and is
    /// empty for single-parameter checks.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    #[error("Unsafe command detected: {0}")]
    CommandRejected(UnsafeReason),

    #[error("{0}")]
    NotFound(String),

    #[error("Command execution timed out after {secs} seconds")]
    Timeout { secs: u64 },

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl TaskError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: BTreeMap::new(),
        }
    }

    pub fn task_not_found(id: &str) -> Self {
        Self::NotFound(format!("Task with ID '{id}' not found"))
    }
}

impl From<ExecutorError> for TaskError {
    fn from(e: ExecutorError) -> Self {
        match e {
            ExecutorError::Rejected(reason) => Self::CommandRejected(reason),
            ExecutorError::Timeout { secs } => Self::Timeout { secs },
            other => Self::Store(anyhow::Error::new(other)),
        }
    }
}
