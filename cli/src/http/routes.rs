//! HTTP路由handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Json, Router,
};
use std::collections::BTreeMap;
use taskmgr_core::api::{ExecutionRecord, Task, TaskCreateRequest, TaskError};

use crate::http::{
    middleware::error_envelope,
    models::*,
    state::AppState,
    validation::{require_param, validate_task_id},
};

/// 创建所有路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler).put(upsert_task_handler))
        .route("/tasks/search", get(search_handler))
        .route("/tasks/validate", get(validate_handler))
        .route("/tasks/health", get(health_handler))
        .route("/tasks/:id", delete(delete_task_handler))
        .route("/tasks/:id/execute", put(execute_task_handler))
        .route("/tasks/:id/executions", get(executions_handler))
        .layer(middleware::from_fn(error_envelope))
        .with_state(state)
}

/// GET /tasks[?id=] - 单个任务或全部任务
async fn get_tasks_handler(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Response, HttpServerError> {
    match query.id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(raw_id) => {
            let task = state
                .tasks
                .get_task(raw_id.trim())
                .await?
                .ok_or_else(|| TaskError::task_not_found(raw_id))?;
            Ok(Json(task).into_response())
        }
        None => Ok(Json(state.tasks.list_tasks().await?).into_response()),
    }
}

/// PUT /tasks - 创建或更新任务
async fn upsert_task_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaskCreateRequest>, JsonRejection>,
) -> Result<Json<Task>, HttpServerError> {
    let Json(req) = payload.map_err(|rejection| {
        let mut errors = BTreeMap::new();
        errors.insert("body".to_string(), rejection.body_text());
        HttpServerError::Validation(errors)
    })?;

    Ok(Json(state.tasks.create_or_update(req).await?))
}

/// DELETE /tasks/{id}
async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<String, HttpServerError> {
    validate_task_id(&id)?;
    if state.tasks.delete_task(&id).await? {
        Ok(format!("Task with ID '{id}' has been deleted successfully"))
    } else {
        Err(TaskError::task_not_found(&id).into())
    }
}

/// GET /tasks/search?name= - 按名称模糊查找
async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Task>>, HttpServerError> {
    let name = require_param(
        query.name.as_deref(),
        "Search parameter 'name' cannot be empty",
    )?;

    let tasks = state.tasks.find_by_name(name.trim()).await?;
    if tasks.is_empty() {
        return Err(HttpServerError::NotFound(format!(
            "No tasks found with name containing '{name}'"
        )));
    }
    Ok(Json(tasks))
}

/// PUT /tasks/{id}/execute - 执行任务命令
async fn execute_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExecutionRecord>, HttpServerError> {
    validate_task_id(&id)?;
    Ok(Json(state.tasks.execute_task(&id).await?))
}

/// GET /tasks/{id}/executions - 执行历史
async fn executions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ExecutionRecord>>, HttpServerError> {
    validate_task_id(&id)?;
    Ok(Json(state.tasks.executions(&id).await?))
}

/// GET /tasks/validate?command= - 命令安全检查
async fn validate_handler(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Result<(StatusCode, &'static str), HttpServerError> {
    let command = require_param(
        query.command.as_deref(),
        "Command parameter cannot be empty",
    )?;

    if state.tasks.is_command_safe(command) {
        Ok((StatusCode::OK, COMMAND_SAFE_MESSAGE))
    } else {
        Ok((StatusCode::BAD_REQUEST, COMMAND_UNSAFE_MESSAGE))
    }
}

/// GET /tasks/health - 健康检查
async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}
