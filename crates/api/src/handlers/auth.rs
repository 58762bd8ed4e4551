//! Handlers for account registration, login and profile lookup.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_db::models::user::{
    CreateUser, LoginRequest, ProfileRequest, RegisterRequest, UserResponse,
};
use bizdesk_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::{hash_for_storage, password_matches};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Emails are compared and stored trimmed and lower-cased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(mut input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    input.username = input.username.trim().to_string();
    input.email = normalize_email(&input.email);
    input.validate()?;

    if input.password != input.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash: hash_for_storage(&input.password)?,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            UserResponse::from(user),
            "User registered successfully",
        )),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !password_matches(&input.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse::with_message(
        UserResponse::from(user),
        "Login successful",
    )))
}

/// POST /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    Json(input): Json<ProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    if email.is_empty() {
        return Err(AppError::BadRequest("Email is required".into()));
    }

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email} not found")))?;

    Ok(Json(DataResponse::new(UserResponse::from(user))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
