//! Handlers for salary advances.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::types::DbId;
use bizdesk_db::models::advance::{CreateAdvance, UpdateAdvance};
use bizdesk_db::repositories::AdvanceRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/advances
pub async fn create_advance(
    State(state): State<AppState>,
    Json(input): Json<CreateAdvance>,
) -> AppResult<impl IntoResponse> {
    let has_text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has_text(&input.email) || !has_text(&input.name) || input.amount.is_none() {
        return Err(AppError::BadRequest(
            "email, name and amount are required".into(),
        ));
    }

    let advance = AdvanceRepo::create(&state.pool, &input).await?;

    tracing::info!(advance_id = advance.id, amount = advance.amount, "Advance created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(advance, "Advance created")),
    ))
}

/// GET /api/v1/advances
pub async fn list_advances(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let advances = AdvanceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(advances)))
}

/// GET /api/v1/advances/{id}
pub async fn get_advance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let advance = AdvanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Advance", id))?;
    Ok(Json(DataResponse::new(advance)))
}

/// PUT /api/v1/advances/{id}
pub async fn update_advance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdvance>,
) -> AppResult<impl IntoResponse> {
    let advance = AdvanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Advance", id))?;

    tracing::info!(advance_id = id, "Advance updated");

    Ok(Json(DataResponse::with_message(advance, "Advance updated")))
}

/// DELETE /api/v1/advances/{id}
pub async fn delete_advance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AdvanceRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Advance", id));
    }

    tracing::info!(advance_id = id, "Advance deleted");

    Ok(Json(MessageResponse::new("Advance deleted")))
}
