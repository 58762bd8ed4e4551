//! Generic handlers for the department, designation and industrial-segment
//! lookup tables. Each route instantiates them with a [`LookupTable`] marker.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::types::DbId;
use bizdesk_db::models::lookup::{LookupInput, LookupTable};
use bizdesk_db::repositories::LookupRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn required_name<T: LookupTable>(input: &LookupInput) -> AppResult<&str> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("{} name is required", T::ENTITY)));
    }
    Ok(name)
}

/// GET /api/v1/{table}
pub async fn list<T: LookupTable>(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = LookupRepo::list::<T>(&state.pool).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/{table}/{id}
pub async fn get<T: LookupTable>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = LookupRepo::find_by_id::<T>(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(T::ENTITY, id))?;
    Ok(Json(DataResponse::new(entry)))
}

/// POST /api/v1/{table}
pub async fn create<T: LookupTable>(
    State(state): State<AppState>,
    Json(input): Json<LookupInput>,
) -> AppResult<impl IntoResponse> {
    let name = required_name::<T>(&input)?;
    let entry = LookupRepo::create::<T>(&state.pool, name).await?;

    tracing::info!(id = entry.id, table = T::TABLE, "Lookup entry created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(entry, format!("{} created", T::ENTITY))),
    ))
}

/// PUT /api/v1/{table}/{id}
pub async fn update<T: LookupTable>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LookupInput>,
) -> AppResult<impl IntoResponse> {
    let name = required_name::<T>(&input)?;
    let entry = LookupRepo::rename::<T>(&state.pool, id, name)
        .await?
        .ok_or(AppError::not_found(T::ENTITY, id))?;

    tracing::info!(id, table = T::TABLE, "Lookup entry renamed");

    Ok(Json(DataResponse::with_message(entry, format!("{} updated", T::ENTITY))))
}

/// DELETE /api/v1/{table}/{id}
pub async fn delete<T: LookupTable>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LookupRepo::delete::<T>(&state.pool, id).await? {
        return Err(AppError::not_found(T::ENTITY, id));
    }

    tracing::info!(id, table = T::TABLE, "Lookup entry deleted");

    Ok(Json(MessageResponse::new(format!("{} deleted", T::ENTITY))))
}
