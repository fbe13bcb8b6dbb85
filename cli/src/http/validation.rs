//! 基础请求验证逻辑

use super::models::HttpServerError;

/// Returns the parameter untouched, or a bad-request error when it is
/// missing or blank.
pub fn require_param<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str, HttpServerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(HttpServerError::BadRequest(message.to_string())),
    }
}

/// 验证路径中的任务ID
pub fn validate_task_id(id: &str) -> Result<(), HttpServerError> {
    if id.trim().is_empty() {
        return Err(HttpServerError::BadRequest(
            "Task ID cannot be empty".to_string(),
        ));
    }
    Ok(())
}
