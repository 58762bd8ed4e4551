//! Handlers for work-order tasks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::types::DbId;
use bizdesk_db::models::task::{TaskFilter, TaskInput};
use bizdesk_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::create(&state.pool, &input).await?;

    tracing::info!(task_id = task.id, assigned_to = ?task.assigned_to, "Task created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(task, "Task created")),
    ))
}

/// GET /api/v1/tasks?assigned_to&status
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(filter): Query<TaskFilter>,
) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse::new(tasks)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Task", id))?;
    Ok(Json(DataResponse::new(task)))
}

/// PUT /api/v1/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TaskInput>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Task", id))?;

    tracing::info!(task_id = id, status = %task.status, "Task updated");

    Ok(Json(DataResponse::with_message(task, "Task updated")))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TaskRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Task", id));
    }

    tracing::info!(task_id = id, "Task deleted");

    Ok(Json(MessageResponse::new("Task deleted")))
}
