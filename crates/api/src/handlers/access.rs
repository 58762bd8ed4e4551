//! Handlers for user types, modules, permissions and access control.
//!
//! Permissions gate what the UI shows; nothing here enforces them on
//! other routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::permissions::visible_modules;
use bizdesk_core::types::DbId;
use bizdesk_db::models::access::{NameInput, SetAccessControl, UpsertPermissions, UserTypeModules};
use bizdesk_db::repositories::AccessRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Trim and validate a create/rename payload.
fn clean_name(mut input: NameInput) -> AppResult<String> {
    input.name = input.name.trim().to_string();
    input.validate()?;
    Ok(input.name)
}

// ---------------------------------------------------------------------------
// User types
// ---------------------------------------------------------------------------

/// GET /api/v1/user-types
pub async fn list_user_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user_types = AccessRepo::list_user_types(&state.pool).await?;
    Ok(Json(DataResponse::new(user_types)))
}

/// GET /api/v1/user-types/{id}
pub async fn get_user_type(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user_type = AccessRepo::find_user_type(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("UserType", id))?;
    Ok(Json(DataResponse::new(user_type)))
}

/// POST /api/v1/user-types
pub async fn create_user_type(
    State(state): State<AppState>,
    Json(input): Json<NameInput>,
) -> AppResult<impl IntoResponse> {
    let name = clean_name(input)?;
    let user_type = AccessRepo::create_user_type(&state.pool, &name).await?;

    tracing::info!(user_type_id = user_type.id, name = %user_type.name, "User type created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(user_type, "User type created")),
    ))
}

/// PUT /api/v1/user-types/{id}
pub async fn update_user_type(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NameInput>,
) -> AppResult<impl IntoResponse> {
    let name = clean_name(input)?;
    let user_type = AccessRepo::rename_user_type(&state.pool, id, &name)
        .await?
        .ok_or(AppError::not_found("UserType", id))?;

    tracing::info!(user_type_id = id, "User type renamed");

    Ok(Json(DataResponse::with_message(user_type, "User type updated")))
}

/// DELETE /api/v1/user-types/{id}
///
/// Also removes the user type's permission and access-control rows.
pub async fn delete_user_type(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AccessRepo::delete_user_type(&state.pool, id).await? {
        return Err(AppError::not_found("UserType", id));
    }

    tracing::info!(user_type_id = id, "User type deleted");

    Ok(Json(MessageResponse::new("User type deleted")))
}

/// GET /api/v1/user-types/by-name/{name}/modules
///
/// A known user type sees its granted modules; an unknown one sees every
/// module with an empty `user_type_name`.
pub async fn modules_for_user_type_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_type = AccessRepo::find_user_type_by_name(&state.pool, name.trim()).await?;

    let (user_type_name, granted) = match &user_type {
        Some(ut) => (
            ut.name.clone(),
            AccessRepo::granted_module_names(&state.pool, ut.id).await?,
        ),
        None => (String::new(), Vec::new()),
    };
    let all = if user_type.is_some() {
        Vec::new()
    } else {
        AccessRepo::all_module_names(&state.pool).await?
    };

    Ok(Json(DataResponse::new(UserTypeModules {
        user_type_name,
        modules: visible_modules(user_type.is_some(), granted, all),
    })))
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

/// GET /api/v1/modules
pub async fn list_modules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let modules = AccessRepo::list_modules(&state.pool).await?;
    Ok(Json(DataResponse::new(modules)))
}

/// POST /api/v1/modules
pub async fn create_module(
    State(state): State<AppState>,
    Json(input): Json<NameInput>,
) -> AppResult<impl IntoResponse> {
    let name = clean_name(input)?;
    let module = AccessRepo::create_module(&state.pool, &name).await?;

    tracing::info!(module_id = module.id, name = %module.name, "Module created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(module, "Module created")),
    ))
}

/// PUT /api/v1/modules/{id}
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<NameInput>,
) -> AppResult<impl IntoResponse> {
    let name = clean_name(input)?;
    let module = AccessRepo::rename_module(&state.pool, id, &name)
        .await?
        .ok_or(AppError::not_found("Module", id))?;

    tracing::info!(module_id = id, "Module renamed");

    Ok(Json(DataResponse::with_message(module, "Module updated")))
}

/// DELETE /api/v1/modules/{id}
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !AccessRepo::delete_module(&state.pool, id).await? {
        return Err(AppError::not_found("Module", id));
    }

    tracing::info!(module_id = id, "Module deleted");

    Ok(Json(MessageResponse::new("Module deleted")))
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// Result of a permission batch.
#[derive(Debug, Serialize)]
pub struct UpsertSummary {
    pub applied: u64,
    pub skipped: u64,
}

/// GET /api/v1/permissions
pub async fn list_permissions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let permissions = AccessRepo::list_permissions(&state.pool).await?;
    Ok(Json(DataResponse::new(permissions)))
}

/// GET /api/v1/permissions/user-type/{id}
pub async fn permissions_for_user_type(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let permissions = AccessRepo::permissions_for_user_type(&state.pool, id).await?;
    Ok(Json(DataResponse::new(permissions)))
}

/// POST /api/v1/permissions/upsert
pub async fn upsert_permissions(
    State(state): State<AppState>,
    Json(input): Json<UpsertPermissions>,
) -> AppResult<impl IntoResponse> {
    let applied = AccessRepo::upsert_permissions(&state.pool, &input.updates).await?;
    let skipped = (input.updates.len() as u64).saturating_sub(applied);

    tracing::info!(applied, skipped, "Permissions upserted");

    Ok(Json(DataResponse::with_message(
        UpsertSummary { applied, skipped },
        "Permissions updated",
    )))
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// GET /api/v1/access-control
pub async fn list_access_controls(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = AccessRepo::list_access_controls(&state.pool).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/access-control
///
/// Replaces the rows of every listed user type.
pub async fn set_access_control(
    State(state): State<AppState>,
    Json(input): Json<SetAccessControl>,
) -> AppResult<impl IntoResponse> {
    if input.user_type_ids.is_empty() {
        return Err(AppError::BadRequest(
            "user_type_ids must not be empty".into(),
        ));
    }

    AccessRepo::replace_access_controls(&state.pool, &input.user_type_ids, input.allow_access)
        .await?;

    tracing::info!(
        user_types = input.user_type_ids.len(),
        allow_access = input.allow_access,
        "Access control replaced",
    );

    Ok(Json(MessageResponse::new("Access control saved")))
}
