//! HTTP API数据模型

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskmgr_core::api::TaskError;

// ============= Query parameters =============

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub command: Option<String>,
}

// ============= Plain-text responses =============

pub const HEALTH_MESSAGE: &str = "Task Manager API is running";
pub const COMMAND_SAFE_MESSAGE: &str = "Command is safe to execute";
pub const COMMAND_UNSAFE_MESSAGE: &str =
    "Command is not safe: contains dangerous operations or patterns";

// ============= Error Handling =============

/// JSON error envelope. `path` is filled in by the `error_envelope`
/// middleware, which sees the request URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
    pub path: String,
}

#[derive(Debug)]
pub enum HttpServerError {
    BadRequest(String),
    Validation(BTreeMap<String, String>),
    NotFound(String),
    /// A failed request whose message is safe to show.
    Failed(String),
    /// Anything else. Details are logged, never returned.
    Unexpected,
}

impl HttpServerError {
    fn parts(self) -> (StatusCode, &'static str, String, Option<BTreeMap<String, String>>) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg, None),
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation Failed",
                "Invalid input provided".to_string(),
                Some(errors),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg, None),
            Self::Failed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                msg,
                None,
            ),
            Self::Unexpected => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                None,
            ),
        }
    }
}

impl From<TaskError> for HttpServerError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::Validation {
                message,
                field_errors,
            } => {
                if field_errors.is_empty() {
                    Self::BadRequest(message)
                } else {
                    Self::Validation(field_errors)
                }
            }
            e @ TaskError::CommandRejected(_) => Self::BadRequest(e.to_string()),
            TaskError::NotFound(msg) => Self::NotFound(msg),
            e @ TaskError::Timeout { .. } => Self::Failed(format!("Failed to execute task: {e}")),
            TaskError::Store(err) => {
                tracing::error!(error = %format!("{err:#}"), "unexpected store failure");
                Self::Unexpected
            }
        }
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let (status, error, message, validation_errors) = self.parts();

        let body = ErrorBody {
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            status: status.as_u16(),
            error: error.to_string(),
            message,
            validation_errors,
            path: String::new(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmgr_core::api::UnsafeReason;

    #[test]
    fn test_query_params_are_optional() {
        let q: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(q.name.is_none());
        let q: ValidateQuery = serde_json::from_str(r#"{"command":"ls"}"#).unwrap();
        assert_eq!(q.command.as_deref(), Some("ls"));
    }

    #[test]
    fn test_error_body_skips_empty_validation_errors() {
        let body = ErrorBody {
            timestamp: "t".into(),
            status: 404,
            error: "Not Found".into(),
            message: "gone".into(),
            validation_errors: None,
            path: "/tasks".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("validationErrors"));
        assert!(json.contains("\"path\":\"/tasks\""));
    }

    #[test]
    fn test_task_error_mapping() {
        let rejected: HttpServerError =
            TaskError::CommandRejected(UnsafeReason::Program("rm")).into();
        let (status, error, message, _) = rejected.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "Bad Request");
        assert_eq!(
            message,
            "Unsafe command detected: Command contains dangerous operation: rm"
        );

        let timeout: HttpServerError = TaskError::Timeout { secs: 30 }.into();
        let (status, _, message, _) = timeout.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            message,
            "Failed to execute task: Command execution timed out after 30 seconds"
        );

        let store: HttpServerError = TaskError::Store(anyhow::anyhow!("disk on fire")).into();
        let (status, _, message, _) = store.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An unexpected error occurred");
    }

    #[test]
    fn test_field_errors_become_validation_failed() {
        let mut field_errors = BTreeMap::new();
        field_errors.insert("name".to_string(), "Task name is required".to_string());
        let err: HttpServerError = TaskError::Validation {
            message: "Invalid input provided".into(),
            field_errors,
        }
        .into();
        let (status, error, _, errors) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "Validation Failed");
        assert_eq!(errors.unwrap()["name"], "Task name is required");
    }
}
